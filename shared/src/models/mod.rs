//! Domain Models
//!
//! Entity definitions shared by the server and its tests. Each entity module
//! follows the same shape: the entity struct plus its create/update payloads.

pub mod client;
pub mod contact;
pub mod invoice;
pub mod prospect;
pub mod session;
pub mod user;

pub use client::{Billing, Client, ClientCreate, ClientStatus, ClientUpdate, PaymentMethod};
pub use contact::Contact;
pub use invoice::{
    Invoice, InvoiceCreate, InvoiceItem, InvoiceItemInput, InvoiceStatus, generate_invoice_number,
};
pub use prospect::{PipelineStage, Prospect, ProspectCreate, ProspectUpdate};
pub use session::{Session, SessionCreate, SessionStatus, SessionType, SessionUpdate};
pub use user::{Permission, PermissionCategory, Role, User, UserCreate, UserUpdate};
