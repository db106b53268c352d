mod invoice;
mod line_item;

pub use invoice::{
    ClientSummary, CreateInvoiceItemRequest, CreateInvoiceRequest, DiscountType, Invoice,
    InvoiceStatus,
};
pub use line_item::InvoiceItem;
