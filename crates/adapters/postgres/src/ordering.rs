//! ORDER BY 子句构建
//!
//! 排序字段来自请求参数，只允许白名单内的列出现在 SQL 中

use catalog_common::{Direction, SortOrder};
use catalog_ports::{DataAccessError, DataAccessResult};

/// 可排序字段白名单
#[derive(Debug, Clone, Copy)]
pub struct SortColumns {
    /// (请求字段名, 列表达式)
    columns: &'static [(&'static str, &'static str)],
    /// 追加在末尾的唯一列，保证分页顺序稳定
    tie_breaker: &'static str,
}

impl SortColumns {
    pub const fn new(
        columns: &'static [(&'static str, &'static str)],
        tie_breaker: &'static str,
    ) -> Self {
        Self {
            columns,
            tie_breaker,
        }
    }

    /// 允许的请求字段名
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|(field, _)| *field)
    }

    fn column(&self, field: &str) -> Option<&'static str> {
        self.columns
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, column)| *column)
    }

    /// 生成 `ORDER BY ...` 子句
    pub fn order_by(&self, sort: &[SortOrder]) -> DataAccessResult<String> {
        let mut parts = Vec::with_capacity(sort.len() + 1);
        let mut has_tie_breaker = false;

        for order in sort {
            let column = self.column(&order.field).ok_or_else(|| {
                DataAccessError::InvalidQuery(format!("cannot sort by '{}'", order.field))
            })?;
            has_tie_breaker |= column == self.tie_breaker;
            parts.push(format!("{column} {}", direction_sql(order.direction)));
        }

        if !has_tie_breaker {
            parts.push(format!("{} ASC", self.tie_breaker));
        }

        Ok(format!("ORDER BY {}", parts.join(", ")))
    }
}

fn direction_sql(direction: Direction) -> &'static str {
    match direction {
        Direction::Asc => "ASC",
        Direction::Desc => "DESC",
    }
}
