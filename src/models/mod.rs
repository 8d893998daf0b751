pub mod activity;
pub mod email;
pub mod lead;
pub mod note;
pub mod notification;
pub mod settings;
pub mod user;

pub use activity::{merge_feed, Activity};
pub use email::{Direction, EmailLog, ResponseType};
pub use lead::{Lead, LeadStatus};
pub use note::Note;
pub use notification::{Notification, NotificationStatus, StatusFilter};
pub use settings::Setting;
pub use user::{Role, User};
