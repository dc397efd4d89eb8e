pub mod login;
pub mod register;
pub mod whoami;

pub use login::login_post;
pub use register::register_post;
pub use whoami::whoami_get;
