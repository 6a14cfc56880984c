use crate::core::{ContactsCtx, Explorer};
use crate::gui::theme::{SECONDARY_TEXT_COLOR, Theme};
use crate::gui::ui::MsgWindow;
use cash_address::AddressFormat;
use eframe::egui::{Align2, ComboBox, Frame, Id, Order, RichText, Ui, Window, vec2};

pub struct SettingsUi {
   pub open: bool,
   pub size: (f32, f32),
}

impl SettingsUi {
   pub fn new() -> Self {
      Self {
         open: false,
         size: (400.0, 200.0),
      }
   }

   pub fn show(&mut self, ctx: &ContactsCtx, theme: &Theme, msg_window: &mut MsgWindow, ui: &mut Ui) {
      if !self.open {
         return;
      }

      let mut open = self.open;
      let settings = ctx.settings();

      Window::new(RichText::new("Settings").size(theme.text_sizes.heading))
         .id(Id::new("settings_window"))
         .open(&mut open)
         .resizable(false)
         .collapsible(false)
         .order(Order::Foreground)
         .anchor(Align2::CENTER_CENTER, (0.0, 0.0))
         .frame(Frame::window(ui.style()))
         .show(ui.ctx(), |ui| {
            ui.set_width(self.size.0);
            ui.set_min_height(self.size.1);
            ui.spacing_mut().item_spacing.y = 15.0;
            ui.spacing_mut().button_padding = vec2(10.0, 8.0);

            let mut cashaddr = settings.cashaddr_format;
            let text = RichText::new("Show addresses in CashAddr format").size(theme.text_sizes.normal);
            if ui.checkbox(&mut cashaddr, text).changed() {
               let format = AddressFormat::from_cashaddr_flag(cashaddr);
               if let Err(e) = ctx.set_address_format(format) {
                  tracing::error!("Failed to save settings: {:#}", e);
                  msg_window.open("Failed to save settings", format!("{:#}", e));
               }
            }

            ui.horizontal(|ui| {
               ui.label(RichText::new("Block explorer:").size(theme.text_sizes.normal));

               let mut explorer = settings.explorer;
               ComboBox::from_id_salt("explorer_select")
                  .selected_text(RichText::new(explorer.to_string()).size(theme.text_sizes.normal))
                  .show_ui(ui, |ui| {
                     for option in Explorer::ALL {
                        let text = RichText::new(option.to_string()).size(theme.text_sizes.normal);
                        ui.selectable_value(&mut explorer, option, text);
                     }
                  });

               if explorer != settings.explorer {
                  if let Err(e) = ctx.set_explorer(explorer) {
                     tracing::error!("Failed to save settings: {:#}", e);
                     msg_window.open("Failed to save settings", format!("{:#}", e));
                  }
               }
            });

            ui.label(
               RichText::new(format!("Network: {}", ctx.network()))
                  .size(theme.text_sizes.small)
                  .color(SECONDARY_TEXT_COLOR),
            );
            ui.label(
               RichText::new(format!("Wallet file: {}", settings.wallet_file.display()))
                  .size(theme.text_sizes.small)
                  .color(SECONDARY_TEXT_COLOR),
            );
         });

      self.open = open;
   }
}
