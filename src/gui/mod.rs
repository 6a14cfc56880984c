pub mod app;
pub mod theme;
pub mod ui;

use crate::core::ContactsCtx;
use eframe::egui::{Align, Button, Context, Layout, RichText, Ui};
use theme::{SECONDARY_TEXT_COLOR, Theme};

pub struct GUI {
   pub ctx: ContactsCtx,

   pub theme: Theme,

   pub contacts_ui: ui::ContactsUi,

   pub settings: ui::SettingsUi,

   pub msg_window: ui::MsgWindow,

   pub toast: ui::Toast,
}

impl GUI {
   pub fn new(ctx: ContactsCtx, theme: Theme, egui_ctx: Context) -> Self {
      let contacts_ui = ui::ContactsUi::new(&ctx, egui_ctx);

      Self {
         ctx,
         theme,
         contacts_ui,
         settings: ui::SettingsUi::new(),
         msg_window: ui::MsgWindow::new(),
         toast: ui::Toast::new(),
      }
   }

   pub fn show_top_panel(&mut self, ui: &mut Ui) {
      ui.horizontal(|ui| {
         let wallet = match self.ctx.wallet_name() {
            Some(name) => format!("Wallet: {}", name),
            None => "No wallet".to_string(),
         };
         ui.label(
            RichText::new(wallet)
               .size(self.theme.text_sizes.normal)
               .color(SECONDARY_TEXT_COLOR),
         );

         ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            let settings = Button::new(RichText::new("Settings").size(self.theme.text_sizes.normal));
            if ui.add(settings).clicked() {
               self.settings.open = !self.settings.open;
            }
         });
      });
   }

   pub fn show_central_panel(&mut self, ui: &mut Ui) {
      self
         .contacts_ui
         .show(&self.ctx, &self.theme, &mut self.toast, &mut self.msg_window, ui);
      self
         .settings
         .show(&self.ctx, &self.theme, &mut self.msg_window, ui);
      self.msg_window.show(&self.theme, ui);
      self.toast.show(&self.theme, ui.ctx());
   }
}
