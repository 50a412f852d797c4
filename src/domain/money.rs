// ==========================================
// 参考数据服务 - 金额值对象
// ==========================================
// 职责: 金额 + 币种；金额按币种小数位统一标度
// 工具: bigdecimal（避免浮点误差）
// ==========================================

use bigdecimal::{BigDecimal, RoundingMode};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 金额相关错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("币种代码非法: '{0}'（需为 3 位大写字母）")]
    InvalidCurrency(String),

    #[error("金额格式错误: '{0}'")]
    NumberFormat(String),
}

// ==========================================
// Currency - 币种
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Currency {
    code: String,
    fraction_digits: u32,
}

impl Currency {
    /// 按 ISO 4217 代码创建币种
    ///
    /// 小数位: JPY/KRW/VND 等为 0，BHD/KWD/OMR/JOD/TND 为 3，其余为 2
    pub fn of(code: &str) -> Result<Self, MoneyError> {
        let normalized = code.trim().to_uppercase();
        if normalized.len() != 3 || !normalized.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(MoneyError::InvalidCurrency(code.to_string()));
        }

        let fraction_digits = match normalized.as_str() {
            "JPY" | "KRW" | "VND" | "CLP" | "ISK" | "UGX" | "XAF" | "XOF" | "RWF" => 0,
            "BHD" | "KWD" | "OMR" | "JOD" | "TND" | "LYD" | "IQD" => 3,
            _ => 2,
        };

        Ok(Self {
            code: normalized,
            fraction_digits,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn fraction_digits(&self) -> u32 {
        self.fraction_digits
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self {
            code: "USD".to_string(),
            fraction_digits: 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

// ==========================================
// Money - 金额
// ==========================================

/// 可导入金额的整数位上限
pub const MAX_INTEGER_DIGITS: i64 = 30;
/// 可导入金额的小数位上限（去掉末尾 0 之后）
pub const MAX_FRACTION_DIGITS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    amount: BigDecimal,
    currency: Currency,
}

impl Money {
    /// 创建金额（按币种小数位做 HALF_EVEN 舍入）
    pub fn of(amount: BigDecimal, currency: Currency) -> Self {
        let amount = amount.with_scale_round(i64::from(currency.fraction_digits), RoundingMode::HalfEven);
        Self { amount, currency }
    }

    /// 从文本解析金额
    ///
    /// # 错误
    /// - 空串或非数字文本 → MoneyError::NumberFormat
    /// - 整数部分超过 MAX_INTEGER_DIGITS 位，或小数位超过 MAX_FRACTION_DIGITS 位
    ///   （含 `1E2000000000` 这类指数写法）→ MoneyError::NumberFormat
    pub fn parse(raw: &str, currency: &Currency) -> Result<Self, MoneyError> {
        let trimmed = raw.trim();
        let amount = BigDecimal::from_str(trimmed)
            .map_err(|_| MoneyError::NumberFormat(raw.to_string()))?
            .normalized();

        // 先于舍入检查位数，超大指数会让重新标度耗尽时间
        let (_, scale) = amount.as_bigint_and_exponent();
        let integer_digits = i128::from(amount.digits()) - i128::from(scale);
        if scale > MAX_FRACTION_DIGITS || integer_digits > i128::from(MAX_INTEGER_DIGITS) {
            return Err(MoneyError::NumberFormat(raw.to_string()));
        }

        Ok(Self::of(amount, currency.clone()))
    }

    pub fn amount(&self) -> &BigDecimal {
        &self.amount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// 不带币种的金额文本（CSV 单元格格式）
    pub fn to_amount_string(&self) -> String {
        self.amount.to_string()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, self.amount)
    }
}
