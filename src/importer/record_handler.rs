// ==========================================
// 参考数据服务 - 分块记录处理契约
// ==========================================
// 流程: CSV 记录块 → RecordProcessor（DTO → 实体）→ RecordWriter（落库）
// ==========================================

use crate::importer::error::ImportResult;

/// DTO → 实体
pub trait RecordProcessor<D, E> {
    fn process(&self, records: Vec<D>) -> ImportResult<Vec<E>>;
}

/// 实体落库
pub trait RecordWriter<E> {
    fn write(&self, entities: Vec<E>) -> ImportResult<()>;
}
