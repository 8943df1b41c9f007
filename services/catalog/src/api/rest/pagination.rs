//! 列表查询参数解析
//!
//! 支持两种写法，可以混用：
//! - `page`、`size`（或 `linesPerPage`）、可重复的 `sort=field[,asc|desc]`
//! - `orderBy` 与 `direction`
//!
//! 未识别的参数被忽略，格式错误的参数返回校验错误

use catalog_common::{Direction, PageRequest, SortOrder};
use catalog_config::PaginationConfig;
use catalog_errors::{AppError, AppResult};

/// 未指定排序时使用的字段
const DEFAULT_SORT_FIELD: &str = "name";

/// 分页默认值与上限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSettings {
    pub default_size: u32,
    pub max_size: u32,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self::from(&PaginationConfig::default())
    }
}

impl From<&PaginationConfig> for PaginationSettings {
    fn from(config: &PaginationConfig) -> Self {
        Self {
            default_size: config.default_size,
            max_size: config.max_size,
        }
    }
}

/// 解析列表查询参数
pub fn parse_page_request(
    params: &[(String, String)],
    settings: &PaginationSettings,
    sortable_fields: &[&str],
) -> AppResult<PageRequest> {
    let mut page = 0;
    let mut size = settings.default_size;
    let mut sort = Vec::new();
    let mut order_by = None;
    let mut direction = None;

    for (key, value) in params {
        match key.as_str() {
            "page" => page = parse_number(key, value)?,
            "size" | "linesPerPage" => {
                size = parse_number(key, value)?;
                if size == 0 || size > settings.max_size {
                    return Err(AppError::validation(format!(
                        "{key} must be between 1 and {}",
                        settings.max_size
                    )));
                }
            }
            "sort" => sort.push(parse_sort(value, sortable_fields)?),
            "orderBy" => order_by = Some(check_field(value.trim(), sortable_fields)?),
            "direction" => direction = Some(parse_direction(value)?),
            _ => {}
        }
    }

    match (order_by, direction) {
        (Some(field), direction) => sort.push(SortOrder {
            field,
            direction: direction.unwrap_or_default(),
        }),
        (None, Some(_)) => {
            return Err(AppError::validation("direction requires orderBy"));
        }
        (None, None) => {}
    }

    if sort.is_empty() {
        sort.push(SortOrder::asc(DEFAULT_SORT_FIELD));
    }

    Ok(PageRequest { page, size, sort })
}

fn parse_number(key: &str, value: &str) -> AppResult<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::validation(format!("invalid {key} '{value}'")))
}

fn parse_direction(value: &str) -> AppResult<Direction> {
    value
        .parse()
        .map_err(|e: catalog_common::ParseDirectionError| AppError::validation(e.to_string()))
}

fn check_field(field: &str, sortable_fields: &[&str]) -> AppResult<String> {
    if sortable_fields.contains(&field) {
        Ok(field.to_string())
    } else {
        Err(AppError::validation(format!(
            "cannot sort by '{field}', allowed: {}",
            sortable_fields.join(", ")
        )))
    }
}

fn parse_sort(value: &str, sortable_fields: &[&str]) -> AppResult<SortOrder> {
    let (field, direction) = match value.split_once(',') {
        Some((field, direction)) => (field, parse_direction(direction)?),
        None => (value, Direction::Asc),
    };

    Ok(SortOrder {
        field: check_field(field.trim(), sortable_fields)?,
        direction,
    })
}
