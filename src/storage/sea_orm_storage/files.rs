//! 文件存储操作

use super::SeaOrmStorage;
use crate::entity::files::{ActiveModel, Entity as Files};
use crate::errors::{ClassHubError, Result};
use crate::models::files::entities::File;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use uuid::Uuid;

impl SeaOrmStorage {
    /// 登记上传文件，生成下载 token
    pub async fn upload_file_impl(
        &self,
        original_name: &str,
        stored_name: &str,
        file_size: &i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File> {
        let now = chrono::Utc::now().timestamp();
        let download_token = Uuid::new_v4().to_string();

        let model = ActiveModel {
            download_token: Set(download_token),
            original_name: Set(original_name.to_string()),
            stored_name: Set(stored_name.to_string()),
            file_size: Set(*file_size),
            file_type: Set(file_type.to_string()),
            user_id: Set(user_id),
            uploaded_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("登记文件失败: {e}")))?;

        Ok(result.into_file())
    }

    /// 通过下载 token 获取文件信息
    pub async fn get_file_by_token_impl(&self, token: &str) -> Result<Option<File>> {
        let result = Files::find_by_id(token.to_string())
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询文件失败: {e}")))?;

        Ok(result.map(|m| m.into_file()))
    }
}
