use crate::core::{
   ContactError, ContactForm, ContactModel, ContactsCtx, DeleteRequest, EventBus, RefreshFlag,
   SubscriptionId, form::payment_uri_address,
};
use crate::gui::theme::{SECONDARY_TEXT_COLOR, Theme};
use crate::gui::ui::{MsgWindow, Toast};
use cash_address::{Address, AddressFormat};
use eframe::egui::{
   Align, Align2, Button, Context, FontId, Frame, Id, Label, Layout, Margin, Order, RichText,
   ScrollArea, TextEdit, Ui, Window, vec2,
};

#[cfg(feature = "qr-scanner")]
use cashbook_qr::QrScanner;

/// Route a failed save or delete to the user
///
/// Input mistakes get a toast and the dialog stays open, anything else is logged and shown in
/// the message window.
fn report_error(title: &str, err: ContactError, toast: &mut Toast, msg_window: &mut MsgWindow) {
   if err.is_validation() {
      toast.open(err.to_string());
      return;
   }

   let msg = match err {
      ContactError::Storage(e) => format!("{:#}", e),
      other => other.to_string(),
   };
   tracing::error!("{}: {}", title, msg);
   msg_window.open(title, msg);
}

/// What happened in a dialog this frame
enum DialogAction {
   None,
   Saved,
   Delete(DeleteRequest),
   Close,
}

/// Add or edit a contact
pub struct ContactDialog {
   form: ContactForm,
   size: (f32, f32),
   #[cfg(feature = "qr-scanner")]
   scanner: QrScanner,
}

impl ContactDialog {
   pub fn new_contact() -> Self {
      Self {
         form: ContactForm::new(),
         size: (450.0, 300.0),
         #[cfg(feature = "qr-scanner")]
         scanner: QrScanner::new(),
      }
   }

   pub fn edit(model: &ContactModel, format: AddressFormat) -> Self {
      Self {
         form: ContactForm::edit(model, format),
         size: (450.0, 300.0),
         #[cfg(feature = "qr-scanner")]
         scanner: QrScanner::new(),
      }
   }

   /// Put a finished scan into the address field
   #[cfg(feature = "qr-scanner")]
   fn poll_scanner(&mut self, toast: &mut Toast, ui: &mut Ui) {
      self.scanner.show(ui.ctx());

      let Some(result) = self.scanner.take_result() else {
         return;
      };

      if self.form.apply_scan(result) {
         toast.open("Address scanned");
      }
   }

   /// Name of another contact that already has the typed address
   fn saved_as(&self, ctx: &ContactsCtx) -> Option<String> {
      let address = Address::parse(payment_uri_address(&self.form.address), ctx.network()).ok()?;
      let contact = ctx.get_contact_by_address(&address)?;

      let same = self
         .form
         .existing()
         .is_some_and(|args| args.name == contact.name && args.address == contact.address);
      (!same).then_some(contact.name)
   }

   /// The contact being edited as it was when the dialog opened
   fn existing_model(&self, ctx: &ContactsCtx) -> Option<ContactModel> {
      let args = self.form.existing()?;
      ContactModel::from_args(args, ctx.network()).ok()
   }

   fn show(
      &mut self,
      ctx: &ContactsCtx,
      theme: &Theme,
      toast: &mut Toast,
      msg_window: &mut MsgWindow,
      ui: &mut Ui,
   ) -> DialogAction {
      #[cfg(feature = "qr-scanner")]
      self.poll_scanner(toast, ui);

      let mut open = true;
      let mut action = DialogAction::None;

      let title = if self.form.is_new() {
         "New contact"
      } else {
         "Edit contact"
      };

      Window::new(RichText::new(title).size(theme.text_sizes.large))
         .id(Id::new("contact_dialog"))
         .open(&mut open)
         .resizable(false)
         .collapsible(false)
         .order(Order::Foreground)
         .anchor(Align2::CENTER_CENTER, (0.0, 0.0))
         .frame(Frame::window(ui.style()))
         .show(ui.ctx(), |ui| {
            ui.set_width(self.size.0);
            ui.set_min_height(self.size.1);

            ui.vertical_centered(|ui| {
               ui.spacing_mut().item_spacing.y = 15.0;
               ui.spacing_mut().button_padding = vec2(10.0, 8.0);
               let text_edit_size = vec2(ui.available_width() * 0.8, 25.0);

               ui.label(RichText::new("Name:").size(theme.text_sizes.normal));
               ui.add(
                  TextEdit::singleline(&mut self.form.name)
                     .min_size(text_edit_size)
                     .margin(Margin::same(10))
                     .font(FontId::proportional(theme.text_sizes.normal)),
               );

               ui.label(RichText::new("Address:").size(theme.text_sizes.normal));
               ui.add(
                  TextEdit::singleline(&mut self.form.address)
                     .min_size(text_edit_size)
                     .margin(Margin::same(10))
                     .font(FontId::proportional(theme.text_sizes.normal)),
               );

               if let Some(saved) = self.saved_as(ctx) {
                  ui.label(
                     RichText::new(format!("Already saved as {}", saved))
                        .size(theme.text_sizes.small)
                        .color(SECONDARY_TEXT_COLOR),
                  );
               }

               ui.horizontal(|ui| {
                  #[cfg(feature = "qr-scanner")]
                  {
                     if self.form.is_new() {
                        let scan = Button::new(RichText::new("Scan QR").size(theme.text_sizes.normal));
                        if ui.add_enabled(!self.scanner.is_scanning(), scan).clicked() {
                           self.scanner.open(ui.ctx().clone());
                        }
                     }
                  }

                  if let Some(model) = self.existing_model(ctx) {
                     let delete = Button::new(RichText::new("Delete").size(theme.text_sizes.normal));
                     if ui.add(delete).clicked() {
                        action = DialogAction::Delete(DeleteRequest::new(&model));
                     }

                     let explore = Button::new(RichText::new("Explore").size(theme.text_sizes.normal));
                     if ui.add(explore).clicked() {
                        let url = ctx.explorer().address_url(&model.address);
                        tracing::debug!("Opening {}", url);
                        ui.ctx().open_url(eframe::egui::OpenUrl::new_tab(url));
                     }

                     let copy = Button::new(RichText::new("Copy address").size(theme.text_sizes.normal));
                     if ui.add(copy).clicked() {
                        ui.ctx().copy_text(model.address_ui_string(ctx.address_format()));
                        toast.open("Address copied");
                     }
                  }
               });

               ui.separator();

               ui.horizontal(|ui| {
                  let ok = Button::new(RichText::new("OK").size(theme.text_sizes.normal));
                  if ui.add(ok).clicked() {
                     match self.form.submit(ctx) {
                        Ok(_) => action = DialogAction::Saved,
                        Err(e) => report_error("Failed to save contact", e, toast, msg_window),
                     }
                  }

                  let cancel = Button::new(RichText::new("Cancel").size(theme.text_sizes.normal));
                  if ui.add(cancel).clicked() {
                     action = DialogAction::Close;
                  }
               });
            });
         });

      if !open {
         action = DialogAction::Close;
      }

      #[cfg(feature = "qr-scanner")]
      {
         if matches!(action, DialogAction::Saved | DialogAction::Close) {
            self.scanner.cancel();
         }
      }

      action
   }
}

/// Asks before deleting a contact
pub struct DeleteContactDialog {
   request: DeleteRequest,
}

impl DeleteContactDialog {
   pub fn new(request: DeleteRequest) -> Self {
      Self { request }
   }

   /// Returns `Some(true)` once the contact is deleted and `Some(false)` if the user backs out
   fn show(
      &mut self,
      ctx: &ContactsCtx,
      theme: &Theme,
      toast: &mut Toast,
      msg_window: &mut MsgWindow,
      ui: &mut Ui,
   ) -> Option<bool> {
      let mut open = true;
      let mut result = None;

      Window::new(RichText::new("Delete contact").size(theme.text_sizes.large))
         .id(Id::new("delete_contact_dialog"))
         .open(&mut open)
         .resizable(false)
         .collapsible(false)
         .order(Order::Tooltip)
         .anchor(Align2::CENTER_CENTER, (0.0, 0.0))
         .frame(Frame::window(ui.style()))
         .show(ui.ctx(), |ui| {
            ui.vertical_centered(|ui| {
               ui.spacing_mut().item_spacing.y = 15.0;
               ui.spacing_mut().button_padding = vec2(10.0, 8.0);
               ui.add_space(10.0);

               ui.label(
                  RichText::new("Are you sure you want to delete this contact?")
                     .size(theme.text_sizes.normal),
               );
               ui.label(RichText::new(self.request.name()).size(theme.text_sizes.large).strong());

               ui.horizontal(|ui| {
                  let delete = Button::new(RichText::new("Delete").size(theme.text_sizes.normal));
                  if ui.add(delete).clicked() {
                     match self.request.confirm(ctx) {
                        Ok(()) => {
                           toast.open(format!("{} deleted", self.request.name()));
                           result = Some(true);
                        }
                        Err(e) => {
                           report_error("Failed to delete contact", e, toast, msg_window);
                           result = Some(false);
                        }
                     }
                  }

                  let cancel = Button::new(RichText::new("Cancel").size(theme.text_sizes.normal));
                  if ui.add(cancel).clicked() {
                     result = Some(false);
                  }
               });
            });
         });

      if !open {
         return Some(false);
      }
      result
   }
}

/// The contacts list
///
/// The list is a snapshot of the wallet's contacts, it is rebuilt whenever a [crate::core::ContactsEvent]
/// arrives.
pub struct ContactsUi {
   events: EventBus,
   subscription: SubscriptionId,
   refresh: RefreshFlag,
   contacts: Option<Vec<ContactModel>>,
   dialog: Option<ContactDialog>,
   delete_dialog: Option<DeleteContactDialog>,
}

impl ContactsUi {
   pub fn new(ctx: &ContactsCtx, egui_ctx: Context) -> Self {
      let refresh = RefreshFlag::new();
      let events = ctx.events();

      let flag = refresh.clone();
      let subscription = events.subscribe(move |event| {
         tracing::trace!("Contacts list refresh on {:?}", event);
         flag.raise();
         egui_ctx.request_repaint();
      });

      Self {
         events,
         subscription,
         refresh,
         contacts: None,
         dialog: None,
         delete_dialog: None,
      }
   }

   pub fn open_new_contact(&mut self) {
      self.dialog = Some(ContactDialog::new_contact());
   }

   pub fn open_edit_contact(&mut self, model: &ContactModel, format: AddressFormat) {
      self.dialog = Some(ContactDialog::edit(model, format));
   }

   fn reload(&mut self, ctx: &ContactsCtx) {
      if self.refresh.take() {
         self.contacts = ctx.contacts();
      }
   }

   pub fn show(
      &mut self,
      ctx: &ContactsCtx,
      theme: &Theme,
      toast: &mut Toast,
      msg_window: &mut MsgWindow,
      ui: &mut Ui,
   ) {
      self.reload(ctx);
      self.list(ctx, theme, toast, ui);
      self.dialogs(ctx, theme, toast, msg_window, ui);
   }

   fn list(&mut self, ctx: &ContactsCtx, theme: &Theme, toast: &mut Toast, ui: &mut Ui) {
      ui.horizontal(|ui| {
         ui.label(RichText::new("Contacts").size(theme.text_sizes.heading));

         ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            let new = Button::new(RichText::new("New contact").size(theme.text_sizes.normal));
            if ui.add_enabled(self.contacts.is_some(), new).clicked() {
               self.open_new_contact();
            }
         });
      });

      ui.add_space(10.0);

      let Some(contacts) = self.contacts.clone() else {
         ui.label(
            RichText::new("No wallet is open")
               .size(theme.text_sizes.large)
               .color(SECONDARY_TEXT_COLOR),
         );
         return;
      };

      if contacts.is_empty() {
         ui.label(
            RichText::new("No contacts yet")
               .size(theme.text_sizes.large)
               .color(SECONDARY_TEXT_COLOR),
         );
         return;
      }

      let format = ctx.address_format();
      ScrollArea::vertical().show(ui, |ui| {
         ui.vertical_centered(|ui| {
            for contact in &contacts {
               Frame::group(ui.style()).inner_margin(8.0).show(ui, |ui| {
                  ui.set_width(500.0);
                  self.contact(theme, toast, contact, format, ui);
               });
            }
         });
      });
   }

   /// Show a contact
   fn contact(
      &mut self,
      theme: &Theme,
      toast: &mut Toast,
      contact: &ContactModel,
      format: AddressFormat,
      ui: &mut Ui,
   ) {
      ui.horizontal(|ui| {
         ui.vertical(|ui| {
            ui.set_max_width(380.0);

            let name = Label::new(RichText::new(&contact.name).size(theme.text_sizes.normal)).wrap();
            ui.add(name);

            let address = contact.address_short(format);
            let res = ui.selectable_label(
               false,
               RichText::new(&address)
                  .size(theme.text_sizes.small)
                  .color(SECONDARY_TEXT_COLOR),
            );
            if res.on_hover_text("Copy address").clicked() {
               ui.ctx().copy_text(contact.address_ui_string(format));
               toast.open("Address copied");
            }
         });

         ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            let edit = Button::new(RichText::new("Edit").size(theme.text_sizes.small));
            if ui.add(edit).clicked() {
               self.open_edit_contact(contact, format);
            }
         });
      });
   }

   fn dialogs(
      &mut self,
      ctx: &ContactsCtx,
      theme: &Theme,
      toast: &mut Toast,
      msg_window: &mut MsgWindow,
      ui: &mut Ui,
   ) {
      if let Some(dialog) = &mut self.dialog {
         match dialog.show(ctx, theme, toast, msg_window, ui) {
            DialogAction::None => {}
            DialogAction::Saved | DialogAction::Close => self.dialog = None,
            DialogAction::Delete(request) => {
               self.delete_dialog = Some(DeleteContactDialog::new(request));
            }
         }
      }

      if let Some(delete_dialog) = &mut self.delete_dialog {
         match delete_dialog.show(ctx, theme, toast, msg_window, ui) {
            Some(true) => {
               self.delete_dialog = None;
               self.dialog = None;
            }
            Some(false) => self.delete_dialog = None,
            None => {}
         }
      }
   }
}

impl Drop for ContactsUi {
   fn drop(&mut self) {
      self.events.unsubscribe(self.subscription);
   }
}
