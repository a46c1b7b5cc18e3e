mod home;
pub use home::Home;

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod forgot_password;
pub use forgot_password::ForgotPassword;

mod reset_password;
pub use reset_password::ResetPassword;

mod patient;
pub use patient::Patient;

mod doctor;
pub use doctor::Doctor;

mod admin;
pub use admin::Admin;
