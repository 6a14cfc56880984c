use super::{Contact, ContactArgs, ContactError, ContactModel, ContactsCtx};
use cash_address::{Address, AddressFormat, Network};

/// State of the add/edit contact dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
   pub name: String,
   pub address: String,

   /// The contact being edited, `None` when adding a new one
   existing: Option<ContactArgs>,
}

impl ContactForm {
   /// An empty form for a new contact
   pub fn new() -> Self {
      Self::default()
   }

   /// A form prefilled with an existing contact
   pub fn edit(model: &ContactModel, format: AddressFormat) -> Self {
      Self {
         name: model.name.clone(),
         address: model.address_ui_string(format),
         existing: Some(model.to_args()),
      }
   }

   pub fn is_new(&self) -> bool {
      self.existing.is_none()
   }

   pub fn existing(&self) -> Option<&ContactArgs> {
      self.existing.as_ref()
   }

   /// Route a QR scan result into the address field
   ///
   /// `None` means the scan was cancelled and leaves the form untouched.
   /// Returns true if the address field changed.
   pub fn apply_scan(&mut self, scan: Option<String>) -> bool {
      match scan {
         Some(text) => {
            self.address = payment_uri_address(&text).to_string();
            true
         }
         None => false,
      }
   }

   /// Check the input and build the contact to save
   pub fn validate(&self, network: Network) -> Result<Contact, ContactError> {
      let name = self.name.trim();
      if name.is_empty() {
         return Err(ContactError::EmptyName);
      }

      let address = Address::parse(&self.address, network)?;
      Ok(Contact::new(name, &address))
   }

   /// The registry entry being replaced
   pub fn old_contact(&self, network: Network) -> Result<Option<Contact>, ContactError> {
      match &self.existing {
         Some(args) => Ok(Some(ContactModel::from_args(args, network)?.to_contact())),
         None => Ok(None),
      }
   }

   /// Validate and save, the contact is written to the wallet before this returns
   pub fn submit(&self, ctx: &ContactsCtx) -> Result<Contact, ContactError> {
      let network = ctx.network();
      let new = self.validate(network)?;
      let old = self.old_contact(network)?;
      ctx.save_contact(new.clone(), old)?;
      Ok(new)
   }
}

/// State of the delete confirmation dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
   args: ContactArgs,
}

impl DeleteRequest {
   pub fn new(model: &ContactModel) -> Self {
      Self {
         args: model.to_args(),
      }
   }

   pub fn from_args(args: ContactArgs) -> Self {
      Self { args }
   }

   pub fn name(&self) -> &str {
      &self.args.name
   }

   pub fn confirm(&self, ctx: &ContactsCtx) -> Result<(), ContactError> {
      let model = ContactModel::from_args(&self.args, ctx.network())?;
      ctx.delete_contact(&model.to_contact())
   }
}

/// The address part of a payment URI, `bitcoincash:q...?amount=1` becomes `bitcoincash:q...`
///
/// Plain addresses are returned trimmed.
pub fn payment_uri_address(text: &str) -> &str {
   let text = text.trim();
   match text.split_once('?') {
      Some((address, _query)) => address,
      None => text,
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   const ALICE_LEGACY: &str = "1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu";
   const ALICE_CASH: &str = "bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a";

   #[test]
   fn empty_name_is_rejected() {
      let form = ContactForm {
         name: "   ".to_string(),
         address: ALICE_CASH.to_string(),
         existing: None,
      };
      assert!(matches!(form.validate(Network::Mainnet), Err(ContactError::EmptyName)));
   }

   #[test]
   fn bad_address_is_rejected() {
      let form = ContactForm {
         name: "Alice".to_string(),
         address: "bitcoincash:qqqq".to_string(),
         existing: None,
      };
      let err = form.validate(Network::Mainnet).unwrap_err();
      assert!(matches!(err, ContactError::InvalidAddress(_)));
      assert!(err.is_validation());
   }

   #[test]
   fn validate_stores_the_storage_string() {
      let form = ContactForm {
         name: " Alice ".to_string(),
         address: ALICE_CASH.to_string(),
         existing: None,
      };
      let contact = form.validate(Network::Mainnet).unwrap();
      assert_eq!(contact.name, "Alice");
      assert_eq!(contact.address, ALICE_LEGACY);
   }

   #[test]
   fn edit_prefills_the_ui_string() {
      let address = Address::parse(ALICE_LEGACY, Network::Mainnet).unwrap();
      let model = ContactModel::new("Alice", address);

      let form = ContactForm::edit(&model, AddressFormat::CashAddr);
      assert!(!form.is_new());
      assert_eq!(form.address, "qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a");
      assert_eq!(
         form.old_contact(Network::Mainnet).unwrap(),
         Some(model.to_contact())
      );

      let form = ContactForm::edit(&model, AddressFormat::Legacy);
      assert_eq!(form.address, ALICE_LEGACY);
   }

   #[test]
   fn cancelled_scan_keeps_the_field() {
      let mut form = ContactForm::new();
      form.address = "typed".to_string();
      assert!(!form.apply_scan(None));
      assert_eq!(form.address, "typed");
   }

   #[test]
   fn scan_result_fills_the_address() {
      let mut form = ContactForm::new();
      assert!(form.apply_scan(Some(format!("{}?amount=0.1&label=coffee", ALICE_CASH))));
      assert_eq!(form.address, ALICE_CASH);

      form.name = "Alice".to_string();
      assert!(form.validate(Network::Mainnet).is_ok());
   }

   #[test]
   fn plain_text_is_only_trimmed() {
      assert_eq!(payment_uri_address("  abc \n"), "abc");
   }
}
