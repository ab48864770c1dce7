pub mod customer;
pub mod dashboard;
pub mod invoice;
pub mod revenue;
pub mod user;

pub use customer::{CustomerField, CustomerTotalsRow, FormattedCustomer};
pub use dashboard::CardData;
pub use invoice::{
    Invoice, InvoiceChanges, InvoiceStatus, InvoiceWithCustomer, LatestInvoice, LatestInvoiceRow,
    NewInvoice,
};
pub use revenue::Revenue;
pub use user::User;
