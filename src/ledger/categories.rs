// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;

use super::CategoryRemoval;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, NewCategory};
use crate::store;

pub(super) fn create(conn: &Connection, new: NewCategory) -> LedgerResult<Category> {
    let name = new.name.trim().to_string();
    if name.is_empty() {
        return Err(LedgerError::validation("category name must not be empty"));
    }
    if store::category_by_name(conn, &new.owner, &name, new.entry_type)?.is_some() {
        return Err(LedgerError::validation(format!(
            "a {} category named '{name}' already exists",
            new.entry_type
        )));
    }
    let new = NewCategory { name, ..new };
    let id = store::insert_category(conn, &new)?;
    Ok(Category {
        id,
        owner: Some(new.owner),
        name: new.name,
        entry_type: new.entry_type,
        color: new.color,
        icon: new.icon,
    })
}

/// Shared categories belong to nobody and cannot be removed by an owner.
pub(super) fn delete(conn: &Connection, owner: &str, id: i64) -> LedgerResult<CategoryRemoval> {
    let category = store::category(conn, id)?
        .filter(|c| c.visible_to(owner))
        .ok_or_else(|| LedgerError::not_found("category", id))?;
    if category.is_shared() {
        return Err(LedgerError::validation(format!(
            "'{}' is a shared category and cannot be deleted",
            category.name
        )));
    }
    let transactions = store::count_transactions_in_category(conn, id)?;
    if transactions > 0 {
        return Ok(CategoryRemoval::InUse {
            category,
            transactions,
        });
    }
    store::delete_category(conn, id)?;
    Ok(CategoryRemoval::Deleted(category))
}
