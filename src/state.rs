use sqlx::SqlitePool;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::repo::{
    BoardRepository, CardRepository, ChecklistRepository, CommentRepository, InviteRepository,
    LabelRepository, ListRepository, MemberRepository, SessionRepository, UserRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub users: UserRepository,
    pub sessions: SessionRepository,
    pub boards: BoardRepository,
    pub members: MemberRepository,
    pub invites: InviteRepository,
    pub lists: ListRepository,
    pub cards: CardRepository,
    pub labels: LabelRepository,
    pub checklists: ChecklistRepository,
    pub comments: CommentRepository,
    pub config: Arc<AppConfig>,
    pub pool: Arc<SqlitePool>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: AppConfig) -> Self {
        let pool = Arc::new(pool);
        Self {
            users: UserRepository::new(pool.clone()),
            sessions: SessionRepository::new(pool.clone(), config.session_ttl_days),
            boards: BoardRepository::new(pool.clone()),
            members: MemberRepository::new(pool.clone()),
            invites: InviteRepository::new(pool.clone()),
            lists: ListRepository::new(pool.clone()),
            cards: CardRepository::new(pool.clone()),
            labels: LabelRepository::new(pool.clone()),
            checklists: ChecklistRepository::new(pool.clone()),
            comments: CommentRepository::new(pool.clone()),
            config: Arc::new(config),
            pool,
        }
    }
}
