use sea_orm_migration::prelude::*;

/// Users (积分钱包 + 账号凭证)
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    Points,
    IsVerified,
    OtpCode,
    OtpExpiresAt,
    CreatedAt,
    UpdatedAt,
}

/// Rewards (奖励目录)
#[derive(DeriveIden)]
enum Rewards {
    Table,
    Id,
    Name,
    Category,
    Cost,
    Stock,
    CreatedById,
    Discount,
    CampaignName,
    Description,
    StartDate,
    EndDate,
    AutoExpireAfterRedemption,
    CreatedAt,
    UpdatedAt,
}

/// Transactions (兑换流水, 只增不改)
#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    UserId,
    RewardId,
    Status,
    CouponCode,
    PointsUsed,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 时间戳一律由应用代码写入, 不依赖数据库默认值 (SQLite 测试环境不支持 NOW())
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Username).string_len(255).not_null())
                    .col(ColumnDef::new(Users::Email).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Users::PasswordHash)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Users::Role).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Users::Points)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Users::IsVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::OtpCode).string_len(16))
                    .col(ColumnDef::new(Users::OtpExpiresAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 邮箱唯一索引 (重复注册返回 409)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_email_unique")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 奖励表
        manager
            .create_table(
                Table::create()
                    .table(Rewards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rewards::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rewards::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Rewards::Category).string_len(255).not_null())
                    .col(ColumnDef::new(Rewards::Cost).big_integer().not_null())
                    .col(
                        ColumnDef::new(Rewards::Stock)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Rewards::CreatedById).big_integer().not_null())
                    .col(ColumnDef::new(Rewards::Discount).double())
                    .col(ColumnDef::new(Rewards::CampaignName).string_len(255))
                    .col(ColumnDef::new(Rewards::Description).text())
                    .col(ColumnDef::new(Rewards::StartDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Rewards::EndDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Rewards::AutoExpireAfterRedemption)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Rewards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rewards::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 奖励名称唯一索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_rewards_name_unique")
                    .table(Rewards::Table)
                    .col(Rewards::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_rewards_created_by")
                    .table(Rewards::Table)
                    .col(Rewards::CreatedById)
                    .to_owned(),
            )
            .await?;

        // 兑换流水表 (不建外键: 历史记录不随用户/奖励删除而级联)
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Transactions::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::RewardId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::Status).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Transactions::CouponCode)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::PointsUsed)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_transactions_user")
                    .table(Transactions::Table)
                    .col(Transactions::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_transactions_reward")
                    .table(Transactions::Table)
                    .col(Transactions::RewardId)
                    .to_owned(),
            )
            .await?;

        // 优惠码全局唯一 (兜底, 生成逻辑也会查重)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_transactions_coupon_code_unique")
                    .table(Transactions::Table)
                    .col(Transactions::CouponCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rewards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
