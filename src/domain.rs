mod waitlist_email;

pub use waitlist_email::WaitlistEmail;
