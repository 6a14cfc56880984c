#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe::egui;
use gui::app::CashbookApp;

pub mod core;
pub mod gui;

use crate::core::{ContactsCtx, Settings, context::open_wallet_in_background, utils::trace::*};

fn main() -> eframe::Result {
   log_panics();
   let _log_guards = setup_tracing(&log_dir());

   let settings = match Settings::load() {
      Ok(settings) => settings,
      Err(e) => {
         tracing::error!("Failed to load settings, using defaults: {:#}", e);
         Settings::default()
      }
   };

   let ctx = ContactsCtx::new(settings);
   open_wallet_in_background(ctx.clone());

   // only use wgpu for windows
   let renderer = if cfg!(target_os = "windows") {
      eframe::Renderer::Wgpu
   } else {
      eframe::Renderer::Glow
   };

   let options = eframe::NativeOptions {
      renderer,
      viewport: egui::ViewportBuilder::default()
         .with_inner_size([640.0, 720.0])
         .with_min_inner_size([480.0, 480.0]),

      ..Default::default()
   };

   eframe::run_native(
      "Cashbook",
      options,
      Box::new(move |cc| {
         let app = CashbookApp::new(cc, ctx);
         Ok(Box::new(app))
      }),
   )
}
