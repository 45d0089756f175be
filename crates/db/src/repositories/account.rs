//! Account repository for chart of accounts database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use ledgra_core::coa::{self, Account, AccountError, CreateAccountInput};
use ledgra_shared::types::{AccountId, TenantId};

use crate::entities::{accounts, journal_lines};

/// Filter options for listing accounts.
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    /// Filter by account type.
    pub account_type: Option<coa::AccountType>,
    /// Filter by active status.
    pub is_active: Option<bool>,
}

/// Account repository for chart of accounts operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

fn db_err(err: DbErr) -> AccountError {
    AccountError::Database(err.to_string())
}

/// Converts an account row to the core domain type.
pub(crate) fn to_core_account(model: &accounts::Model) -> Account {
    Account {
        id: AccountId::from_uuid(model.id),
        tenant_id: TenantId::from_uuid(model.tenant_id),
        code: model.code.clone(),
        name: model.name.clone(),
        account_type: model.account_type.into(),
        normal_balance: model.normal_balance.into(),
        parent_id: model.parent_id.map(AccountId::from_uuid),
        is_active: model.is_active,
        is_system: model.is_system,
    }
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new account with validation.
    ///
    /// The normal balance is derived from the account type here and never
    /// changes afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is malformed or already taken, or the
    /// parent is missing or of a different type.
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let existing = accounts::Entity::find()
            .filter(accounts::Column::TenantId.eq(input.tenant_id.into_inner()))
            .filter(accounts::Column::Code.eq(&input.code))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_some() {
            return Err(AccountError::DuplicateCode(input.code));
        }

        let parent = match input.parent_id {
            Some(parent_id) => {
                let parent = accounts::Entity::find_by_id(parent_id.into_inner())
                    .filter(accounts::Column::TenantId.eq(input.tenant_id.into_inner()))
                    .one(&self.db)
                    .await
                    .map_err(db_err)?
                    .ok_or(AccountError::ParentNotFound(parent_id))?;
                Some(to_core_account(&parent))
            }
            None => None,
        };

        coa::validate_new_account(&input, parent.as_ref())?;

        let now = chrono::Utc::now().into();
        let account = accounts::ActiveModel {
            id: Set(AccountId::new().into_inner()),
            tenant_id: Set(input.tenant_id.into_inner()),
            code: Set(input.code),
            name: Set(input.name),
            account_type: Set(input.account_type.into()),
            normal_balance: Set(input.account_type.normal_balance().into()),
            parent_id: Set(input.parent_id.map(AccountId::into_inner)),
            is_active: Set(true),
            is_system: Set(input.is_system),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = account.insert(&self.db).await.map_err(db_err)?;
        tracing::info!(
            tenant_id = %model.tenant_id,
            account_id = %model.id,
            code = %model.code,
            "account created"
        );
        Ok(model)
    }

    /// Finds an account by ID within a tenant.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist for the tenant.
    pub async fn get_account(
        &self,
        tenant_id: TenantId,
        account_id: AccountId,
    ) -> Result<accounts::Model, AccountError> {
        accounts::Entity::find_by_id(account_id.into_inner())
            .filter(accounts::Column::TenantId.eq(tenant_id.into_inner()))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(AccountError::NotFound(account_id))
    }

    /// Finds an account by code within a tenant.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_code(
        &self,
        tenant_id: TenantId,
        code: &str,
    ) -> Result<Option<accounts::Model>, AccountError> {
        accounts::Entity::find()
            .filter(accounts::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(accounts::Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Lists accounts for a tenant, ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_accounts(
        &self,
        tenant_id: TenantId,
        filter: AccountFilter,
    ) -> Result<Vec<accounts::Model>, AccountError> {
        let mut query = accounts::Entity::find()
            .filter(accounts::Column::TenantId.eq(tenant_id.into_inner()));

        if let Some(account_type) = filter.account_type {
            let db_type: crate::entities::sea_orm_active_enums::AccountType = account_type.into();
            query = query.filter(accounts::Column::AccountType.eq(db_type));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(accounts::Column::IsActive.eq(is_active));
        }

        query
            .order_by_asc(accounts::Column::Code)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Deactivates an account. System accounts are protected.
    ///
    /// # Errors
    ///
    /// Returns `SystemAccountProtected` for system accounts.
    pub async fn deactivate_account(
        &self,
        tenant_id: TenantId,
        account_id: AccountId,
    ) -> Result<accounts::Model, AccountError> {
        let model = self.get_account(tenant_id, account_id).await?;
        coa::validate_deactivate(&to_core_account(&model))?;

        let mut active: accounts::ActiveModel = model.into();
        active.is_active = Set(false);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&self.db).await.map_err(db_err)
    }

    /// Deletes an account. Rejected for system accounts and accounts with
    /// journal lines.
    ///
    /// # Errors
    ///
    /// Returns `SystemAccountProtected` or `AccountHasActivity`.
    pub async fn delete_account(
        &self,
        tenant_id: TenantId,
        account_id: AccountId,
    ) -> Result<(), AccountError> {
        let model = self.get_account(tenant_id, account_id).await?;

        let line_count = journal_lines::Entity::find()
            .filter(journal_lines::Column::AccountId.eq(account_id.into_inner()))
            .count(&self.db)
            .await
            .map_err(db_err)?;

        coa::validate_delete(&to_core_account(&model), line_count)?;

        accounts::Entity::delete_by_id(account_id.into_inner())
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        tracing::info!(
            tenant_id = %tenant_id,
            account_id = %account_id,
            "account deleted"
        );
        Ok(())
    }
}
