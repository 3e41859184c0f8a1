//! Extension traits

mod count;
mod depot;
mod product_id;

pub(crate) use count::CountExt as _;
pub(crate) use depot::DepotExt as _;
pub(crate) use product_id::ProductIdExt as _;
