mod ids;
mod item;
mod mistake;
mod progress;
mod settings;
mod stat;

pub use ids::{HintId, ItemId, ParseIdError, TopicId};
pub use item::{Hint, Question, StudyItem, Topic, VocabCard};
pub use mistake::{MISTAKE_LOG_CAP, MISTAKE_MERGE_CAP, MistakeRecord};
pub use progress::{Progress, ProgressPatch, StatMap};
pub use settings::{SessionState, SettingsPatch, StudyMode, StudySettings};
pub use stat::{DEFAULT_MASTERY, ItemStat};
