pub mod assets;
pub mod html;
pub mod redirect;

pub use crate::errors::ResultResp;

pub use assets::{css_response, MAIN_CSS};
pub use html::{html_response, html_response_with_status};
pub use redirect::{redirect, redirect_with_cookie};
