//! Local, single-user authentication.

mod session;
mod token;
mod user;

pub use session::{
    current_user, delete_account, is_authenticated, log_in, log_out, require_user, sign_up,
};
pub use token::current_token;
pub use user::{ProfileUpdate, User, get_user, update_profile};
