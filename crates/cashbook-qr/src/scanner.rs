use crate::{decode_luma, rgba_to_luma};
use egui::{Align2, Context, Key, Order, RichText, Window, vec2};
use enigo::Mouse;
use std::sync::{
   Arc, Mutex, PoisonError,
   atomic::{AtomicI32, Ordering},
};
use std::time::Duration;
use xcap::Monitor;

type Error = Box<dyn std::error::Error>;

const SCAN_INTERVAL: Duration = Duration::from_millis(200);
const MIN_CAPTURE_SIZE: i32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScanStatus {
   #[default]
   Idle,
   Scanning,
   Decoded(String),
   Cancelled,
}

/// Scans the screen area around the mouse cursor for a QR code
///
/// Scanning happens on a background thread, the result is polled with [QrScanner::take_result].
///
/// # Usage:
///
/// ```ignore
///  let scanner = QrScanner::new();
///  scanner.open(ctx.clone());
///  // every frame
///  scanner.show(&ctx);
///  if let Some(result) = scanner.take_result() {
///     // `None` means the user cancelled
///  }
/// ```
#[derive(Clone)]
pub struct QrScanner {
   status: Arc<Mutex<ScanStatus>>,
   capture_size: Arc<AtomicI32>,
   last_error: Arc<Mutex<Option<String>>>,
}

impl QrScanner {
   pub fn new() -> Self {
      Self {
         status: Arc::new(Mutex::new(ScanStatus::Idle)),
         capture_size: Arc::new(AtomicI32::new(300)),
         last_error: Arc::new(Mutex::new(None)),
      }
   }

   fn set_status(&self, status: ScanStatus) {
      *self.status.lock().unwrap_or_else(PoisonError::into_inner) = status;
   }

   pub fn status(&self) -> ScanStatus {
      self.status.lock().unwrap_or_else(PoisonError::into_inner).clone()
   }

   pub fn is_scanning(&self) -> bool {
      self.status() == ScanStatus::Scanning
   }

   pub fn open(&self, ctx: Context) {
      if self.is_scanning() {
         return;
      }

      self.set_status(ScanStatus::Scanning);
      *self.last_error.lock().unwrap_or_else(PoisonError::into_inner) = None;

      let scanner = self.clone();
      std::thread::spawn(move || scanner.scan_loop(ctx));
      tracing::info!("QR scanner opened");
   }

   pub fn cancel(&self) {
      if self.is_scanning() {
         self.set_status(ScanStatus::Cancelled);
         tracing::info!("QR scan cancelled");
      }
   }

   /// `Some(Some(text))` when a code was decoded, `Some(None)` when the scan was cancelled
   ///
   /// Resets the scanner back to idle once a result is taken.
   pub fn take_result(&self) -> Option<Option<String>> {
      let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
      let result = match &*status {
         ScanStatus::Decoded(text) => Some(Some(text.clone())),
         ScanStatus::Cancelled => Some(None),
         ScanStatus::Idle | ScanStatus::Scanning => None,
      };

      if result.is_some() {
         *status = ScanStatus::Idle;
      }
      result
   }

   fn scan_loop(&self, ctx: Context) {
      while self.is_scanning() {
         match capture_and_decode(self.capture_size.load(Ordering::Relaxed)) {
            Ok(text) => {
               // the user may have cancelled while we were capturing
               let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
               if *status == ScanStatus::Scanning {
                  *status = ScanStatus::Decoded(text);
               }
               ctx.request_repaint();
               return;
            }
            Err(e) => {
               *self.last_error.lock().unwrap_or_else(PoisonError::into_inner) = Some(e.to_string());
            }
         }

         ctx.request_repaint();
         std::thread::sleep(SCAN_INTERVAL);
      }
   }

   /// Show the scanning instructions, call this every frame
   pub fn show(&self, ctx: &Context) {
      if !self.is_scanning() {
         return;
      }

      ctx.input_mut(|i| {
         if i.consume_key(egui::Modifiers::NONE, Key::Plus)
            || i.consume_key(egui::Modifiers::NONE, Key::Equals)
         {
            self.capture_size.fetch_add(10, Ordering::Relaxed);
         }

         if i.consume_key(egui::Modifiers::NONE, Key::Minus) {
            let size = (self.capture_size.load(Ordering::Relaxed) - 10).max(MIN_CAPTURE_SIZE);
            self.capture_size.store(size, Ordering::Relaxed);
         }

         if i.consume_key(egui::Modifiers::NONE, Key::Escape) {
            self.cancel();
         }
      });

      let last_error = self.last_error.lock().unwrap_or_else(PoisonError::into_inner).clone();
      let mut cancel = false;

      Window::new(RichText::new("Scan QR code").size(18.0))
         .resizable(false)
         .collapsible(false)
         .order(Order::Foreground)
         .anchor(Align2::CENTER_CENTER, vec2(0.0, 0.0))
         .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
               ui.spacing_mut().item_spacing.y = 10.0;
               ui.label(RichText::new("Move the mouse over a QR code on your screen.").size(14.0));
               ui.label(
                  RichText::new(format!(
                     "Capture area: {}px (press + or - to change it)",
                     self.capture_size.load(Ordering::Relaxed)
                  ))
                  .size(14.0),
               );

               if let Some(e) = last_error {
                  ui.label(RichText::new(e).size(14.0).color(egui::Color32::RED));
               }

               if ui.button("Cancel").clicked() {
                  cancel = true;
               }
            });
         });

      if cancel {
         self.cancel();
      }
   }
}

impl Default for QrScanner {
   fn default() -> Self {
      Self::new()
   }
}

/// Capture a square around the cursor on the monitor under it and decode it
fn capture_and_decode(capture_size: i32) -> Result<String, Error> {
   let enigo = enigo::Enigo::new(&enigo::Settings::default())?;
   let (mouse_x, mouse_y) = enigo.location()?;
   let monitor = Monitor::from_point(mouse_x, mouse_y)?;

   let mon_x = monitor.x()?;
   let mon_y = monitor.y()?;
   let mon_width = monitor.width()? as i32;
   let mon_height = monitor.height()? as i32;

   let half = capture_size / 2;
   let cap_x = (mouse_x - half).clamp(mon_x, (mon_x + mon_width - capture_size).max(mon_x));
   let cap_y = (mouse_y - half).clamp(mon_y, (mon_y + mon_height - capture_size).max(mon_y));
   let cap_width: u32 = capture_size.min(mon_x + mon_width - cap_x).try_into()?;
   let cap_height: u32 = capture_size.min(mon_y + mon_height - cap_y).try_into()?;

   // coords relative to the monitor origin
   let rel_x: u32 = (cap_x - mon_x).try_into()?;
   let rel_y: u32 = (cap_y - mon_y).try_into()?;
   let image = monitor.capture_region(rel_x, rel_y, cap_width, cap_height)?;

   let luma = rgba_to_luma(image.as_raw());
   let text = decode_luma(image.width() as usize, image.height() as usize, &luma)?;
   Ok(text)
}
