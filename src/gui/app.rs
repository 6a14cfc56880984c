use crate::core::ContactsCtx;
use crate::gui::{GUI, theme::Theme};
use eframe::{
   CreationContext,
   egui::{self, Frame, Margin},
};

pub struct CashbookApp {
   pub gui: GUI,
}

impl CashbookApp {
   pub fn new(cc: &CreationContext, ctx: ContactsCtx) -> Self {
      let theme = Theme::dark();
      cc.egui_ctx.set_style(theme.style.clone());

      let gui = GUI::new(ctx, theme, cc.egui_ctx.clone());
      Self { gui }
   }
}

impl eframe::App for CashbookApp {
   fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
      let gui = &mut self.gui;
      let bg_frame = Frame::new().fill(gui.theme.bg_color).inner_margin(Margin::same(12));

      egui::TopBottomPanel::top("top_panel")
         .resizable(false)
         .show_separator_line(true)
         .frame(bg_frame.clone())
         .show(ctx, |ui| {
            gui.show_top_panel(ui);
         });

      egui::CentralPanel::default()
         .frame(bg_frame)
         .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
               ui.set_max_width(560.0);
               gui.show_central_panel(ui);
            });
         });
   }
}
