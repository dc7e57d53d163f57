pub mod price_list;
pub mod quote;
