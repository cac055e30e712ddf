//! SQL DDL for the finance schema.
//!
//! Tables are listed in foreign-key order. Each entry names the tables it
//! references so a failed parent can short-circuit its dependents.

/// One table plus the auxiliary statements (indexes, triggers) that belong to it.
#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    pub name: &'static str,
    pub depends_on: &'static [&'static str],
    pub statements: &'static [&'static str],
}

pub const USERS: TableDef = TableDef {
    name: "Users",
    depends_on: &[],
    statements: &[
        r#"
        CREATE TABLE IF NOT EXISTS Users (
            user_id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL,
            email TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
        // Lookup index for login; deliberately not UNIQUE.
        "CREATE INDEX IF NOT EXISTS idx_users_email ON Users(email)",
        r#"
        CREATE TRIGGER IF NOT EXISTS trg_users_updated_at
        AFTER UPDATE ON Users FOR EACH ROW
        BEGIN
            UPDATE Users SET updated_at = CURRENT_TIMESTAMP WHERE user_id = NEW.user_id;
        END
        "#,
    ],
};

pub const CATEGORIES: TableDef = TableDef {
    name: "Categories",
    depends_on: &["Users"],
    statements: &[
        r#"
        CREATE TABLE IF NOT EXISTS Categories (
            category_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER REFERENCES Users(user_id),
            category_name TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
        r#"
        CREATE TRIGGER IF NOT EXISTS trg_categories_updated_at
        AFTER UPDATE ON Categories FOR EACH ROW
        BEGIN
            UPDATE Categories SET updated_at = CURRENT_TIMESTAMP WHERE category_id = NEW.category_id;
        END
        "#,
    ],
};

pub const PAYMENT_METHODS: TableDef = TableDef {
    name: "PaymentMethods",
    depends_on: &["Users"],
    statements: &[
        r#"
        CREATE TABLE IF NOT EXISTS PaymentMethods (
            payment_method_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER REFERENCES Users(user_id),
            payment_method_name TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
        r#"
        CREATE TRIGGER IF NOT EXISTS trg_payment_methods_updated_at
        AFTER UPDATE ON PaymentMethods FOR EACH ROW
        BEGIN
            UPDATE PaymentMethods SET updated_at = CURRENT_TIMESTAMP
            WHERE payment_method_id = NEW.payment_method_id;
        END
        "#,
    ],
};

pub const EXPENSES: TableDef = TableDef {
    name: "Expenses",
    depends_on: &["Users", "Categories"],
    statements: &[
        r#"
        CREATE TABLE IF NOT EXISTS Expenses (
            expense_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER REFERENCES Users(user_id),
            category_id INTEGER REFERENCES Categories(category_id),
            amount NUMERIC(10, 2) NOT NULL,
            date DATE NOT NULL,
            description TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
        r#"
        CREATE TRIGGER IF NOT EXISTS trg_expenses_updated_at
        AFTER UPDATE ON Expenses FOR EACH ROW
        BEGIN
            UPDATE Expenses SET updated_at = CURRENT_TIMESTAMP WHERE expense_id = NEW.expense_id;
        END
        "#,
    ],
};

pub const BUDGETS: TableDef = TableDef {
    name: "Budgets",
    depends_on: &["Users", "Categories"],
    statements: &[
        r#"
        CREATE TABLE IF NOT EXISTS Budgets (
            budget_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER REFERENCES Users(user_id),
            category_id INTEGER REFERENCES Categories(category_id),
            amount NUMERIC(10, 2) NOT NULL,
            start_date DATE NOT NULL,
            end_date DATE NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
        r#"
        CREATE TRIGGER IF NOT EXISTS trg_budgets_updated_at
        AFTER UPDATE ON Budgets FOR EACH ROW
        BEGIN
            UPDATE Budgets SET updated_at = CURRENT_TIMESTAMP WHERE budget_id = NEW.budget_id;
        END
        "#,
    ],
};

/// Every table in creation order.
pub const SCHEMA: &[TableDef] = &[USERS, CATEGORIES, PAYMENT_METHODS, EXPENSES, BUDGETS];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependencies_precede_dependents() {
        for (idx, table) in SCHEMA.iter().enumerate() {
            for dep in table.depends_on {
                let dep_idx = SCHEMA
                    .iter()
                    .position(|t| t.name == *dep)
                    .unwrap_or_else(|| panic!("{} depends on unknown table {}", table.name, dep));
                assert!(dep_idx < idx, "{} listed before its dependency {}", table.name, dep);
            }
        }
    }

    #[test]
    fn every_statement_is_idempotent() {
        for table in SCHEMA {
            for stmt in table.statements {
                assert!(stmt.contains("IF NOT EXISTS"), "{} has non-idempotent DDL", table.name);
            }
        }
    }
}
