pub mod static_partner_directory;

pub use static_partner_directory::StaticPartnerDirectory;
