// ==========================================
// 参考数据服务 - 记录类型描述 (ModelClass)
// ==========================================
// 职责: 有序字段列表 + 外部表头 → 内部路径解析
// 不变式: 字段顺序即声明顺序，构造后不再变化
// ==========================================

use crate::model::error::MappingError;
use crate::model::field::{FieldDescriptor, FieldSpec};
use crate::model::record::CsvRecord;
use std::collections::HashMap;
use std::marker::PhantomData;

pub struct ModelClass<T> {
    fields: Vec<FieldDescriptor>,
    // 小写外部列名 → 字段下标
    by_name: HashMap<String, usize>,
    _record: PhantomData<fn() -> T>,
}

impl<T: CsvRecord> ModelClass<T> {
    /// 从记录类型的字段表构造
    ///
    /// # 错误
    /// - 字段路径非法
    /// - 外部列名（大小写不敏感）重复
    pub fn new() -> Result<Self, MappingError> {
        Self::from_specs(T::field_table())
    }
}

impl<T> ModelClass<T> {
    pub fn from_specs(specs: &[FieldSpec]) -> Result<Self, MappingError> {
        let mut fields = Vec::with_capacity(specs.len());
        let mut by_name = HashMap::with_capacity(specs.len());

        for spec in specs {
            let field = FieldDescriptor::from_spec(spec)?;
            // 与表头查找同一规范化：去首尾空白后小写
            let lowered = field.external_name.trim().to_lowercase();
            if by_name.insert(lowered, fields.len()).is_some() {
                return Err(MappingError::DuplicateExternalName {
                    name: field.external_name,
                });
            }
            fields.push(field);
        }

        Ok(Self {
            fields,
            by_name,
            _record: PhantomData,
        })
    }

    /// 全部可导入/导出字段（声明顺序）
    pub fn import_fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// 外部列名（声明顺序）
    pub fn header_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.external_name.as_str()).collect()
    }

    /// 按外部列名查找字段（大小写不敏感）
    pub fn find_field_by_external_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .map(|&idx| &self.fields[idx])
    }

    /// 解析表头行
    ///
    /// # 返回
    /// - 与表头同序的字段描述
    ///
    /// # 错误
    /// - 遇到第一个无法匹配的表头单元格即失败（不收集）
    pub fn resolve_headers<S: AsRef<str>>(
        &self,
        headers: &[S],
    ) -> Result<Vec<&FieldDescriptor>, MappingError> {
        headers
            .iter()
            .map(|h| {
                self.find_field_by_external_name(h.as_ref())
                    .ok_or_else(|| MappingError::UnknownHeader {
                        header: h.as_ref().to_string(),
                    })
            })
            .collect()
    }

    /// 解析表头行为内部路径（点分字符串）
    pub fn internal_paths<S: AsRef<str>>(&self, headers: &[S]) -> Result<Vec<String>, MappingError> {
        Ok(self
            .resolve_headers(headers)?
            .into_iter()
            .map(|f| f.internal_path.to_string())
            .collect())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy;

    const DUMMY_FIELDS: &[FieldSpec] = &[
        FieldSpec::new("Mandatory String Field", "mandatoryStringField", "String", true),
        FieldSpec::new("mandatoryIntField", "mandatoryIntField", "int", true),
        FieldSpec::new("optionalStringField", "optionalStringField", "String", false),
        FieldSpec::new("Facility Type", "type.code", "String", false),
    ];

    fn model() -> ModelClass<Dummy> {
        ModelClass::from_specs(DUMMY_FIELDS).unwrap()
    }

    #[test]
    fn test_fields_keep_declaration_order() {
        let model = model();
        assert_eq!(
            model.header_names(),
            vec![
                "Mandatory String Field",
                "mandatoryIntField",
                "optionalStringField",
                "Facility Type"
            ]
        );
        assert_eq!(model.len(), 4);
    }

    #[test]
    fn test_resolve_headers_follows_header_order_any_case() {
        let model = model();
        let paths = model
            .internal_paths(&["facility TYPE", "MANDAtory String Field", "mandatoryIntFIELD"])
            .unwrap();
        assert_eq!(paths, vec!["type.code", "mandatoryStringField", "mandatoryIntField"]);
    }

    #[test]
    fn test_resolve_headers_fails_on_first_unknown_cell() {
        let model = model();
        let err = model
            .resolve_headers(&["mandatoryIntField", "not existing", "also missing"])
            .unwrap_err();
        assert_eq!(
            err,
            MappingError::UnknownHeader {
                header: "not existing".to_string()
            }
        );
    }

    #[test]
    fn test_find_field_by_external_name() {
        let model = model();
        let field = model.find_field_by_external_name("optionalstringfield").unwrap();
        assert_eq!(field.type_tag, "String");
        assert!(!field.mandatory);
        assert!(model.find_field_by_external_name("nonAnnotatedField").is_none());
    }

    #[test]
    fn test_duplicate_external_names_rejected() {
        const DUPLICATED: &[FieldSpec] = &[
            FieldSpec::new("Code", "code", "String", true),
            FieldSpec::new("CODE", "otherCode", "String", false),
        ];
        let err = ModelClass::<Dummy>::from_specs(DUPLICATED).err().unwrap();
        assert_eq!(
            err,
            MappingError::DuplicateExternalName {
                name: "CODE".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_external_names_rejected_after_trimming() {
        const PADDED: &[FieldSpec] = &[
            FieldSpec::new("Code", "code", "String", true),
            FieldSpec::new("Code ", "otherCode", "String", false),
        ];
        let err = ModelClass::<Dummy>::from_specs(PADDED).err().unwrap();
        assert_eq!(
            err,
            MappingError::DuplicateExternalName {
                name: "Code ".to_string()
            }
        );
    }

    #[test]
    fn test_padded_external_name_is_found_by_header() {
        const SINGLE: &[FieldSpec] = &[FieldSpec::new(" Code ", "code", "String", true)];
        let model = ModelClass::<Dummy>::from_specs(SINGLE).unwrap();
        assert!(model.find_field_by_external_name("code").is_some());
        assert!(model.find_field_by_external_name(" CODE ").is_some());
    }
}
