// ==========================================
// 参考数据服务 - 理想库存量导入处理
// ==========================================
// Processor: 按编码解析机构/报告期/商品类型，已有记录更新数量
// Writer: 单事务批量写入
// ==========================================

use crate::domain::{message_keys, IdealStockAmount, IdealStockAmountKey, Message};
use crate::dto::IdealStockAmountCsvModel;
use crate::error::ValidationError;
use crate::importer::error::ImportResult;
use crate::importer::record_handler::{RecordProcessor, RecordWriter};
use crate::repository::IdealStockAmountRepository;
use std::sync::Arc;
use tracing::debug;

const NULL_TEXT: &str = "null";

fn not_found(message: Message) -> ValidationError {
    ValidationError::new(message)
}

pub struct IdealStockAmountProcessor {
    repo: Arc<IdealStockAmountRepository>,
}

impl IdealStockAmountProcessor {
    pub fn new(repo: Arc<IdealStockAmountRepository>) -> Self {
        Self { repo }
    }

    fn resolve_key(&self, dto: &IdealStockAmountCsvModel) -> ImportResult<IdealStockAmountKey> {
        let facility_code = dto
            .facility
            .as_ref()
            .and_then(|f| f.code.as_deref())
            .unwrap_or(NULL_TEXT);
        let facility_id = self.repo.find_facility_id(facility_code)?.ok_or_else(|| {
            not_found(
                Message::new(message_keys::ISA_FACILITY_NOT_FOUND).with_arg("code", facility_code),
            )
        })?;

        let (schedule, period) = dto
            .processing_period
            .as_ref()
            .map(|p| {
                (
                    p.schedule_code.as_deref().unwrap_or(NULL_TEXT),
                    p.name.as_deref().unwrap_or(NULL_TEXT),
                )
            })
            .unwrap_or((NULL_TEXT, NULL_TEXT));
        let processing_period_id = self
            .repo
            .find_processing_period_id(schedule, period)?
            .ok_or_else(|| {
                not_found(
                    Message::new(message_keys::ISA_PROCESSING_PERIOD_NOT_FOUND)
                        .with_arg("schedule", schedule)
                        .with_arg("period", period),
                )
            })?;

        let (system, id) = dto
            .commodity_type
            .as_ref()
            .map(|c| {
                (
                    c.classification_system.as_deref().unwrap_or(NULL_TEXT),
                    c.classification_id.as_deref().unwrap_or(NULL_TEXT),
                )
            })
            .unwrap_or((NULL_TEXT, NULL_TEXT));
        let commodity_type_id = self.repo.find_commodity_type_id(system, id)?.ok_or_else(|| {
            not_found(
                Message::new(message_keys::ISA_COMMODITY_TYPE_NOT_FOUND)
                    .with_arg("system", system)
                    .with_arg("id", id),
            )
        })?;

        Ok(IdealStockAmountKey {
            facility_id,
            commodity_type_id,
            processing_period_id,
        })
    }
}

impl RecordProcessor<IdealStockAmountCsvModel, IdealStockAmount> for IdealStockAmountProcessor {
    fn process(&self, records: Vec<IdealStockAmountCsvModel>) -> ImportResult<Vec<IdealStockAmount>> {
        let mut entities = Vec::with_capacity(records.len());

        for dto in &records {
            let key = self.resolve_key(dto)?;
            let amount = dto.amount.unwrap_or_default();

            let entity = match self.repo.find_existing(&key)? {
                Some(mut existing) => {
                    existing.amount = amount;
                    existing
                }
                None => IdealStockAmount::new(key, amount),
            };
            entities.push(entity);
        }

        debug!(count = entities.len(), "理想库存量记录已解析");
        Ok(entities)
    }
}

pub struct IdealStockAmountWriter {
    repo: Arc<IdealStockAmountRepository>,
}

impl IdealStockAmountWriter {
    pub fn new(repo: Arc<IdealStockAmountRepository>) -> Self {
        Self { repo }
    }
}

impl RecordWriter<IdealStockAmount> for IdealStockAmountWriter {
    fn write(&self, entities: Vec<IdealStockAmount>) -> ImportResult<()> {
        self.repo.save_all(&entities)?;
        Ok(())
    }
}
