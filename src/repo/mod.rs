pub mod board;
pub mod card;
pub mod checklist;
pub mod comment;
pub mod invite;
pub mod label;
pub mod list;
pub mod member;
pub mod position;
pub mod session;
pub mod user;

pub use board::BoardRepository;
pub use card::CardRepository;
pub use checklist::ChecklistRepository;
pub use comment::CommentRepository;
pub use invite::InviteRepository;
pub use label::LabelRepository;
pub use list::ListRepository;
pub use member::MemberRepository;
pub use session::SessionRepository;
pub use user::UserRepository;
