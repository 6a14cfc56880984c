use super::contacts::Contact;
use cash_address::{Address, AddressFormat, Network};

/// A contact as shown in the contacts list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactModel {
   pub name: String,
   pub address: Address,
}

/// What a dialog needs to rebuild a [ContactModel]
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct ContactArgs {
   pub name: String,

   /// Storage string of the address
   pub address: String,
}

impl ContactModel {
   pub fn new(name: impl Into<String>, address: Address) -> Self {
      Self {
         name: name.into(),
         address,
      }
   }

   pub fn from_contact(contact: &Contact, network: Network) -> Result<Self, cash_address::Error> {
      Ok(Self::new(contact.name.clone(), contact.address(network)?))
   }

   pub fn from_args(args: &ContactArgs, network: Network) -> Result<Self, cash_address::Error> {
      Ok(Self::new(
         args.name.clone(),
         Address::parse(&args.address, network)?,
      ))
   }

   pub fn to_args(&self) -> ContactArgs {
      ContactArgs {
         name: self.name.clone(),
         address: self.address_storage_string(),
      }
   }

   /// The registry entry this model was built from
   pub fn to_contact(&self) -> Contact {
      Contact::new(self.name.clone(), &self.address)
   }

   pub fn address_ui_string(&self, format: AddressFormat) -> String {
      self.address.to_ui_string(format)
   }

   pub fn address_storage_string(&self) -> String {
      self.address.to_storage_string()
   }

   /// First and last characters of the address
   pub fn address_short(&self, format: AddressFormat) -> String {
      let address = self.address_ui_string(format);
      let len = address.chars().count();
      if len <= 16 {
         return address;
      }

      let head: String = address.chars().take(8).collect();
      let tail: String = address.chars().skip(len - 6).collect();
      format!("{}...{}", head, tail)
   }
}

/// Build the list view snapshot from the registry contents
///
/// Contacts that are not addresses or whose address no longer parses are left out.
pub fn list_models(contacts: &[Contact], network: Network) -> Vec<ContactModel> {
   let mut models = Vec::with_capacity(contacts.len());
   for contact in contacts {
      if !contact.kind.is_address() {
         continue;
      }

      match ContactModel::from_contact(contact, network) {
         Ok(model) => models.push(model),
         Err(e) => tracing::warn!("Contact {} has an invalid address: {}", contact.name, e),
      }
   }

   sort_by_name(&mut models);
   models
}

/// Case-sensitive lexicographic order, "Bob" < "Carol" < "alice"
pub fn sort_by_name(models: &mut [ContactModel]) {
   models.sort_by(|a, b| a.name.cmp(&b.name));
}
