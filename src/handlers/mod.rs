pub mod invitations;
pub mod partners;
