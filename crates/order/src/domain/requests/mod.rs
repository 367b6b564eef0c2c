mod order;

pub use self::order::{
    CheckoutRequest, CreateOrderItemRecordRequest, CreateOrderRecordRequest, PaymentDetails,
    UpdateStatusRequest,
};
