// ==========================================
// 参考数据服务 - 字段描述
// ==========================================
// 职责: 单个可导入/导出属性的元数据
// 来源: 每个记录类型手写的静态字段表（FieldSpec）
// ==========================================

use crate::model::error::MappingError;
use std::fmt;

// ==========================================
// FieldSpec - 静态字段表条目
// ==========================================
/// 记录类型声明字段时使用的常量条目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// 外部列名（CSV 表头）
    pub name: &'static str,
    /// 内部路径（如 `code` 或 `type.code`）
    pub path: &'static str,
    /// 类型标签（决定单元格处理器）
    pub type_tag: &'static str,
    /// 是否必填
    pub mandatory: bool,
}

impl FieldSpec {
    pub const fn new(
        name: &'static str,
        path: &'static str,
        type_tag: &'static str,
        mandatory: bool,
    ) -> Self {
        Self {
            name,
            path,
            type_tag,
            mandatory,
        }
    }
}

// ==========================================
// FieldPath - 内部字段路径
// ==========================================
/// 最多一级嵌套的字段路径
///
/// 嵌套字段（`parent.code`）只贡献一个外部列，取自子对象的一个属性。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    root: String,
    nested: Option<String>,
}

impl FieldPath {
    /// 解析点分路径
    ///
    /// # 错误
    /// - 空段、两级以上嵌套 → MappingError::InvalidPath
    pub fn parse(raw: &str) -> Result<Self, MappingError> {
        let invalid = || MappingError::InvalidPath {
            path: raw.to_string(),
        };

        let mut parts = raw.split('.');
        let root = parts.next().filter(|p| !p.trim().is_empty()).ok_or_else(invalid)?;
        let nested = match parts.next() {
            None => None,
            Some(p) if p.trim().is_empty() => return Err(invalid()),
            Some(p) => Some(p.to_string()),
        };
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self {
            root: root.to_string(),
            nested,
        })
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn nested(&self) -> Option<&str> {
        self.nested.as_deref()
    }

    pub fn is_nested(&self) -> bool {
        self.nested.is_some()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.nested {
            Some(nested) => write!(f, "{}.{}", self.root, nested),
            None => write!(f, "{}", self.root),
        }
    }
}

// ==========================================
// FieldDescriptor - 字段描述（不可变）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub external_name: String,
    pub internal_path: FieldPath,
    pub type_tag: String,
    pub mandatory: bool,
}

impl FieldDescriptor {
    pub fn from_spec(spec: &FieldSpec) -> Result<Self, MappingError> {
        Ok(Self {
            external_name: spec.name.to_string(),
            internal_path: FieldPath::parse(spec.path)?,
            type_tag: spec.type_tag.to_string(),
            mandatory: spec.mandatory,
        })
    }

    /// 外部列名是否匹配（大小写不敏感）
    pub fn matches_name(&self, header: &str) -> bool {
        self.external_name.trim().to_lowercase() == header.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_plain() {
        let path = FieldPath::parse("code").unwrap();
        assert_eq!(path.root(), "code");
        assert_eq!(path.nested(), None);
        assert_eq!(path.to_string(), "code");
    }

    #[test]
    fn test_field_path_one_level_nesting() {
        let path = FieldPath::parse("geographicZone.code").unwrap();
        assert_eq!(path.root(), "geographicZone");
        assert_eq!(path.nested(), Some("code"));
        assert!(path.is_nested());
    }

    #[test]
    fn test_field_path_rejects_deep_or_empty() {
        assert!(FieldPath::parse("a.b.c").is_err());
        assert!(FieldPath::parse("").is_err());
        assert!(FieldPath::parse("a.").is_err());
        assert!(FieldPath::parse(".a").is_err());
    }

    #[test]
    fn test_descriptor_matches_name_case_insensitive() {
        let spec = FieldSpec::new("Facility Code", "facility", "Facility", true);
        let field = FieldDescriptor::from_spec(&spec).unwrap();
        assert!(field.matches_name("facility CODE"));
        assert!(field.matches_name(" Facility Code "));
        assert!(!field.matches_name("Facility"));
    }
}
