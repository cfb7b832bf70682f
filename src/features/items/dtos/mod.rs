mod item_dto;
mod submission_dto;

pub use item_dto::{
    ClaimItemDocDto, ClaimItemDto, NewFoundItem, NewLostItem, SubmitFoundItemDto,
    SubmitLostItemDto,
};
pub use submission_dto::{ItemSubmission, UploadedImage};
