//! PostgreSQL implementations of the store traits.

pub mod chat;
pub mod interaction;
pub mod interest;
pub mod notification;
pub mod profile;
pub mod push;
pub mod settings;
pub mod user;

pub use chat::ChatRepository;
pub use interaction::InteractionRepository;
pub use interest::InterestRepository;
pub use notification::NotificationRepository;
pub use profile::ProfileRepository;
pub use push::PushSubscriptionRepository;
pub use settings::SettingsRepository;
pub use user::UserRepository;

/// Columns of [`kuconnect_entity::profile::Profile`], without the embedding.
pub(crate) const PROFILE_COLUMNS: &str = "id, user_id, display_name, bio, image, birthdate, \
     faculty, department, year, line, facebook, instagram, other, created_at, updated_at";

/// [`PROFILE_COLUMNS`] qualified with the `p` alias.
pub(crate) const PROFILE_COLUMNS_P: &str = "p.id, p.user_id, p.display_name, p.bio, p.image, \
     p.birthdate, p.faculty, p.department, p.year, p.line, p.facebook, p.instagram, p.other, \
     p.created_at, p.updated_at";
