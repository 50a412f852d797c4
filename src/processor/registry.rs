// ==========================================
// 参考数据服务 - 单元格处理器注册表
// ==========================================
// 职责: 按类型标签选择处理器，并按必填/可选包装空值
// 规则:
// - 未注册标签 → 透传（导入导出均为原样文本）
// - 必填字段空值 → CellConversionError
// - 可选字段空值 → 导出空单元格 / 导入 None，不调用类型化处理器
// ==========================================

use crate::config::CsvSettings;
use crate::model::{CellValue, FieldDescriptor};
use crate::processor::error::{CellContext, CellConversionError};
use crate::processor::format::{
    FormatCodeReference, FormatCommodityType, FormatDispensable, FormatMoney, FormatPassthrough,
    FormatProcessingPeriod, FormatProcessor,
};
use crate::processor::parse::{
    ParseBoolean, ParseCode, ParseCodeReference, ParseCommodityType, ParseDispensable,
    ParseLocalDate, ParseMoney, ParsePositiveInteger, ParseProcessingPeriod, ParseProcessor,
    ParsePassthrough,
};
use crate::processor::type_tags;
use std::collections::HashMap;
use std::sync::Arc;

const MANDATORY_VALUE_MISSING: &str = "必填字段取值为空";

pub struct CellProcessorRegistry {
    parsers: HashMap<String, Arc<dyn ParseProcessor>>,
    formatters: HashMap<String, Arc<dyn FormatProcessor>>,
    passthrough_parser: Arc<dyn ParseProcessor>,
    passthrough_formatter: Arc<dyn FormatProcessor>,
}

impl CellProcessorRegistry {
    /// 空注册表（全部标签走透传）
    pub fn empty() -> Self {
        Self {
            parsers: HashMap::new(),
            formatters: HashMap::new(),
            passthrough_parser: Arc::new(ParsePassthrough),
            passthrough_formatter: Arc::new(FormatPassthrough),
        }
    }

    /// 按配置注册全部内置处理器
    pub fn new(settings: &CsvSettings) -> Self {
        let mut registry = Self::empty();
        let separator = settings.composite_separator.as_str();

        let code_refs = [
            (type_tags::FACILITY, "机构"),
            (type_tags::PROGRAM, "项目"),
            (type_tags::ORDERABLE, "产品"),
            (type_tags::ORDERABLE_DISPLAY_CATEGORY, "产品类别"),
        ];
        for (tag, type_name) in code_refs {
            registry.register(
                tag,
                Arc::new(ParseCodeReference),
                Arc::new(FormatCodeReference::new(type_name)),
            );
        }

        registry.register(
            type_tags::COMMODITY_TYPE,
            Arc::new(ParseCommodityType::new(separator)),
            Arc::new(FormatCommodityType::new(separator)),
        );
        registry.register(
            type_tags::PROCESSING_PERIOD,
            Arc::new(ParseProcessingPeriod::new(separator)),
            Arc::new(FormatProcessingPeriod::new(separator)),
        );
        registry.register(
            type_tags::DISPENSABLE,
            Arc::new(ParseDispensable),
            Arc::new(FormatDispensable),
        );
        registry.register(
            type_tags::MONEY,
            Arc::new(ParseMoney::new(settings.currency.clone())),
            Arc::new(FormatMoney),
        );

        // 以下标签导出时原样输出
        registry.register_parser(type_tags::CODE, Arc::new(ParseCode));
        registry.register_parser(type_tags::BOOLEAN, Arc::new(ParseBoolean));
        registry.register_parser(type_tags::POSITIVE_INT, Arc::new(ParsePositiveInteger::int()));
        registry.register_parser(type_tags::POSITIVE_LONG, Arc::new(ParsePositiveInteger::long()));
        registry.register_parser(type_tags::LOCAL_DATE, Arc::new(ParseLocalDate));

        registry
    }

    pub fn register(
        &mut self,
        tag: &str,
        parser: Arc<dyn ParseProcessor>,
        formatter: Arc<dyn FormatProcessor>,
    ) {
        self.register_parser(tag, parser);
        self.register_formatter(tag, formatter);
    }

    pub fn register_parser(&mut self, tag: &str, parser: Arc<dyn ParseProcessor>) {
        self.parsers.insert(tag.to_string(), parser);
    }

    pub fn register_formatter(&mut self, tag: &str, formatter: Arc<dyn FormatProcessor>) {
        self.formatters.insert(tag.to_string(), formatter);
    }

    pub fn parser_for(&self, tag: &str) -> &dyn ParseProcessor {
        &**self.parsers.get(tag).unwrap_or(&self.passthrough_parser)
    }

    pub fn formatter_for(&self, tag: &str) -> &dyn FormatProcessor {
        &**self
            .formatters
            .get(tag)
            .unwrap_or(&self.passthrough_formatter)
    }

    /// 标签在任一方向上是否有专用处理器
    pub fn is_registered(&self, tag: &str) -> bool {
        self.parsers.contains_key(tag) || self.formatters.contains_key(tag)
    }

    /// 导入一个单元格
    ///
    /// # 返回
    /// - Ok(None): 可选字段空白
    pub fn parse_cell(
        &self,
        field: &FieldDescriptor,
        raw: &str,
        ctx: &CellContext,
    ) -> Result<Option<CellValue>, CellConversionError> {
        if raw.trim().is_empty() {
            return if field.mandatory {
                Err(ctx.error(raw, MANDATORY_VALUE_MISSING))
            } else {
                Ok(None)
            };
        }

        self.parser_for(&field.type_tag).parse(raw, ctx).map(Some)
    }

    /// 导出一个单元格
    pub fn format_cell(
        &self,
        field: &FieldDescriptor,
        value: Option<&CellValue>,
        ctx: &CellContext,
    ) -> Result<String, CellConversionError> {
        match value {
            Some(value) => self.formatter_for(&field.type_tag).format(value, ctx),
            None if field.mandatory => Err(ctx.error("null", MANDATORY_VALUE_MISSING)),
            None => Ok(String::new()),
        }
    }
}

impl Default for CellProcessorRegistry {
    fn default() -> Self {
        Self::new(&CsvSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CommodityTypeRef, Money, ProcessingPeriodRef};
    use crate::model::FieldSpec;
    use bigdecimal::BigDecimal;

    fn field(tag: &'static str, mandatory: bool) -> FieldDescriptor {
        FieldDescriptor::from_spec(&FieldSpec::new("Column", "column", tag, mandatory)).unwrap()
    }

    fn ctx() -> CellContext {
        CellContext::new(2, 1, "Column")
    }

    #[test]
    fn test_unknown_tag_falls_back_to_passthrough() {
        let registry = CellProcessorRegistry::default();
        assert!(!registry.is_registered("SomethingElse"));

        let parsed = registry
            .parse_cell(&field("SomethingElse", true), "  value  ", &ctx())
            .unwrap();
        assert_eq!(parsed, Some(CellValue::Text("  value  ".to_string())));

        let formatted = registry
            .format_cell(
                &field("SomethingElse", true),
                Some(&CellValue::Integer(7)),
                &ctx(),
            )
            .unwrap();
        assert_eq!(formatted, "7");
    }

    #[test]
    fn test_mandatory_null_fails_both_directions() {
        let registry = CellProcessorRegistry::default();
        let mandatory = field(type_tags::FACILITY, true);

        let err = registry.format_cell(&mandatory, None, &ctx()).unwrap_err();
        assert_eq!(err.column, "Column");
        assert_eq!(err.reason, MANDATORY_VALUE_MISSING);

        assert!(registry.parse_cell(&mandatory, "   ", &ctx()).is_err());
    }

    #[test]
    fn test_optional_null_is_empty_cell_or_none() {
        let registry = CellProcessorRegistry::default();
        let optional = field(type_tags::COMMODITY_TYPE, false);

        assert_eq!(registry.format_cell(&optional, None, &ctx()).unwrap(), "");
        assert_eq!(registry.parse_cell(&optional, "", &ctx()).unwrap(), None);
    }

    #[test]
    fn test_registry_uses_configured_separator() {
        let settings = CsvSettings {
            composite_separator: "/".to_string(),
            ..CsvSettings::default()
        };
        let registry = CellProcessorRegistry::new(&settings);

        let formatted = registry
            .format_cell(
                &field(type_tags::PROCESSING_PERIOD, true),
                Some(&CellValue::ProcessingPeriod(ProcessingPeriodRef::new(
                    "SCH001", "Jan2017",
                ))),
                &ctx(),
            )
            .unwrap();
        assert_eq!(formatted, "SCH001/Jan2017");

        let parsed = registry
            .parse_cell(&field(type_tags::COMMODITY_TYPE, true), "WHO/1", &ctx())
            .unwrap();
        assert_eq!(
            parsed,
            Some(CellValue::CommodityType(CommodityTypeRef::new("WHO", "1")))
        );
    }

    #[test]
    fn test_money_uses_configured_currency() {
        let registry = CellProcessorRegistry::default();
        let money_field = field(type_tags::MONEY, false);

        let parsed = registry.parse_cell(&money_field, "10", &ctx()).unwrap();
        let money = Money::of(BigDecimal::from(10), Default::default());
        assert_eq!(parsed, Some(CellValue::Money(money.clone())));
        assert_eq!(
            registry
                .format_cell(&money_field, Some(&CellValue::Money(money)), &ctx())
                .unwrap(),
            "10.00"
        );
    }

    #[test]
    fn test_int_tag_only_registers_parser() {
        let registry = CellProcessorRegistry::default();
        let int_field = field(type_tags::POSITIVE_INT, true);
        assert!(registry.is_registered(type_tags::POSITIVE_INT));
        assert!(registry.parse_cell(&int_field, "-3", &ctx()).is_err());
        assert_eq!(
            registry
                .format_cell(&int_field, Some(&CellValue::Integer(3)), &ctx())
                .unwrap(),
            "3"
        );
    }
}
