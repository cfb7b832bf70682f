mod form;
mod item_handler;

pub use form::read_submission;
pub use item_handler::{
    __path_claim_item, __path_get_all_items, __path_get_lost_items, __path_submit_found_item,
    __path_submit_lost_item, claim_item, get_all_items, get_lost_items, submit_found_item,
    submit_lost_item,
};
