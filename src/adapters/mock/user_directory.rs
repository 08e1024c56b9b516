use crate::domain::value_objects::UserId;
use crate::ports::user_directory::{Result, UserDirectory as UserDirectoryTrait, UserProfile};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// UserDirectoryのモック実装
///
/// プロフィールを登録することで状態を持ったテストをサポート。
pub struct UserDirectory {
    profiles: Mutex<HashMap<UserId, UserProfile>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self {
            profiles: Mutex::new(HashMap::new()),
        }
    }

    /// テスト用にプロフィールを登録
    pub fn add_user(&self, profile: UserProfile) {
        self.profiles.lock().unwrap().insert(profile.user_id, profile);
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectoryTrait for UserDirectory {
    /// 登録されたプロフィールの中からIDで取得
    async fn get_profile(&self, user_id: UserId) -> Result<Option<UserProfile>> {
        Ok(self.profiles.lock().unwrap().get(&user_id).cloned())
    }
}
