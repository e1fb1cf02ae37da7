pub use super::blacklist::Entity as Blacklist;
pub use super::temp_exempt::Entity as TempExempt;
