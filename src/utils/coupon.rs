use crate::entities::transactions;
use crate::error::AppResult;
use rand::Rng;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const CODE_LEN: usize = 6;

/// 取奖励名前 3 个字符作为前缀并大写; 不足 3 个字符时取全名。
/// 目录层已要求名称至少 3 个字符, 这里兜底保证短名不会越界。
pub fn coupon_prefix(reward_name: &str) -> String {
    reward_name.chars().take(3).collect::<String>().to_uppercase()
}

/// 生成 "<prefix>-XXXXXX" 格式的优惠码 (6 位大写字母数字)
pub fn generate_coupon_code(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    let code: String = (0..CODE_LEN)
        .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
        .collect();
    format!("{prefix}-{code}")
}

/// 生成未在流水表中出现过的优惠码 (全局唯一, 数据库唯一索引兜底)
pub async fn generate_unique_coupon_code(
    pool: &DatabaseConnection,
    reward_name: &str,
) -> AppResult<String> {
    let prefix = coupon_prefix(reward_name);

    loop {
        let code = generate_coupon_code(&prefix);

        let exists = transactions::Entity::find()
            .filter(transactions::Column::CouponCode.eq(code.clone()))
            .count(pool)
            .await?;

        if exists == 0 {
            return Ok(code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_coupon_code_format() {
        let pattern = Regex::new(r"^AMZ-[A-Z0-9]{6}$").unwrap();
        for _ in 0..100 {
            let code = generate_coupon_code("AMZ");
            assert!(pattern.is_match(&code), "unexpected code: {code}");
        }
    }

    #[test]
    fn test_coupon_prefix() {
        assert_eq!(coupon_prefix("Amazon Gift Card"), "AMA");
        assert_eq!(coupon_prefix("amz"), "AMZ");
        // 短名与多字节名不会 panic
        assert_eq!(coupon_prefix("tv"), "TV");
        assert_eq!(coupon_prefix(""), "");
        assert_eq!(coupon_prefix("咖啡券"), "咖啡券");
    }
}
