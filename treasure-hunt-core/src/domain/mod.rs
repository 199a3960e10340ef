pub mod activity;
pub mod alert;
pub mod asset;
pub mod location;
pub mod notification;
pub mod quest;
pub mod quest_state;
pub mod unlock_request;
pub mod user;

pub use activity::ActivityData;
pub use alert::SosAlert;
pub use asset::{NewUserAsset, UserAsset};
pub use location::{LocationFix, PlayerLocation, PresenceStatus, ACTIVE_THRESHOLD_SECONDS};
pub use notification::{NotificationKind, UnlockNotification};
pub use quest::{GeoPoint, Quest, SubTask, SubTaskId, SubTaskKind, Task, TaskId};
pub use quest_state::{QuestError, QuestState};
pub use unlock_request::{NewUnlockRequest, UnlockRequest, UnlockRequestStatus};
pub use user::{Gender, GroupMember, IdType, NewUser, Role, User, UserChanges, UserProfile};
