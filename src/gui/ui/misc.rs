use crate::gui::theme::Theme;
use eframe::egui::{Align2, Area, Button, Context, Frame, Id, Order, RichText, Ui, Window, vec2};
use std::time::{Duration, Instant};

const TOAST_DURATION: Duration = Duration::from_secs(3);

/// A window that shows a message with an Ok button
pub struct MsgWindow {
   pub open: bool,
   pub title: String,
   pub message: String,
}

impl MsgWindow {
   pub fn new() -> Self {
      Self {
         open: false,
         title: String::new(),
         message: String::new(),
      }
   }

   /// Open the window with this title and message
   pub fn open(&mut self, title: impl Into<String>, msg: impl Into<String>) {
      self.open = true;
      self.title = title.into();
      self.message = msg.into();
   }

   pub fn reset(&mut self) {
      self.open = false;
      self.title.clear();
      self.message.clear();
   }

   pub fn show(&mut self, theme: &Theme, ui: &mut Ui) {
      if !self.open {
         return;
      }

      let title = RichText::new(self.title.clone()).size(theme.text_sizes.large);
      let msg = RichText::new(&self.message).size(theme.text_sizes.normal);
      let ok = Button::new(RichText::new("Ok").size(theme.text_sizes.normal));

      let mut close = false;
      Window::new(title)
         .id(Id::new("msg_window"))
         .resizable(false)
         .order(Order::Foreground)
         .movable(true)
         .anchor(Align2::CENTER_CENTER, vec2(0.0, 0.0))
         .collapsible(false)
         .frame(Frame::window(ui.style()))
         .show(ui.ctx(), |ui| {
            ui.vertical_centered(|ui| {
               ui.set_min_size(vec2(300.0, 100.0));
               ui.scope(|ui| {
                  ui.spacing_mut().item_spacing.y = 20.0;
                  ui.spacing_mut().button_padding = vec2(10.0, 8.0);

                  ui.label(msg);

                  if ui.add(ok).clicked() {
                     close = true;
                  }
               });
            });
         });

      if close {
         self.reset();
      }
   }
}

/// A short message at the bottom of the window that goes away on its own
pub struct Toast {
   message: Option<(String, Instant)>,
}

impl Toast {
   pub fn new() -> Self {
      Self { message: None }
   }

   pub fn open(&mut self, msg: impl Into<String>) {
      self.message = Some((msg.into(), Instant::now()));
   }

   pub fn show(&mut self, theme: &Theme, ctx: &Context) {
      let Some((msg, shown_at)) = &self.message else {
         return;
      };

      let elapsed = shown_at.elapsed();
      if elapsed >= TOAST_DURATION {
         self.message = None;
         return;
      }

      Area::new(Id::new("toast"))
         .order(Order::Tooltip)
         .anchor(Align2::CENTER_BOTTOM, vec2(0.0, -40.0))
         .interactable(false)
         .show(ctx, |ui| {
            Frame::popup(ui.style()).inner_margin(10.0).show(ui, |ui| {
               ui.label(RichText::new(msg.as_str()).size(theme.text_sizes.normal));
            });
         });

      ctx.request_repaint_after(TOAST_DURATION - elapsed);
   }
}
