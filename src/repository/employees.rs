//! Employee domain methods on Repository

use uuid::Uuid;

use super::Repository;
use crate::{
    error::AppResult,
    models::employee::{Employee, NewEmployee},
};

impl Repository {
    /// Create the employees collection if it does not exist yet
    pub async fn employees_ensure_collection(&self) -> AppResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS employees (
                id UUID PRIMARY KEY,
                position BIGINT GENERATED ALWAYS AS IDENTITY,
                name TEXT NOT NULL,
                age INTEGER NOT NULL,
                legal_status TEXT NOT NULL DEFAULT ''
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// List all employees in insertion order
    pub async fn employees_list(&self) -> AppResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, Employee>(
            "SELECT id, name, age, legal_status FROM employees ORDER BY position",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Insert a single employee
    pub async fn employees_insert_one(&self, data: &NewEmployee) -> AppResult<Employee> {
        let row = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (id, name, age, legal_status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, age, legal_status
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(data.age)
        .bind(&data.legal_status)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Insert several employees atomically
    pub async fn employees_insert_many(&self, data: &[NewEmployee]) -> AppResult<Vec<Employee>> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::with_capacity(data.len());
        for employee in data {
            let row = sqlx::query_as::<_, Employee>(
                r#"
                INSERT INTO employees (id, name, age, legal_status)
                VALUES ($1, $2, $3, $4)
                RETURNING id, name, age, legal_status
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&employee.name)
            .bind(employee.age)
            .bind(&employee.legal_status)
            .fetch_one(&mut *tx)
            .await?;
            inserted.push(row);
        }
        tx.commit().await?;
        Ok(inserted)
    }

    /// First employee with the given name
    pub async fn employees_find_by_name(&self, name: &str) -> AppResult<Option<Employee>> {
        let row = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, name, age, legal_status FROM employees
            WHERE name = $1
            ORDER BY position
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Employees aged `min_age` or older
    pub async fn employees_find_min_age(&self, min_age: i32) -> AppResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, name, age, legal_status FROM employees
            WHERE age >= $1
            ORDER BY position
            "#,
        )
        .bind(min_age)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Rename and re-age the first employee called `name`
    pub async fn employees_update_one_by_name(
        &self,
        name: &str,
        new_name: &str,
        new_age: i32,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE employees SET name = $2, age = $3
            WHERE id = (
                SELECT id FROM employees WHERE name = $1 ORDER BY position LIMIT 1
            )
            "#,
        )
        .bind(name)
        .bind(new_name)
        .bind(new_age)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Set the legal status of everyone at or above `min_age`
    pub async fn employees_set_status_min_age(&self, min_age: i32, status: &str) -> AppResult<u64> {
        let result = sqlx::query("UPDATE employees SET legal_status = $2 WHERE age >= $1")
            .bind(min_age)
            .bind(status)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Set the legal status of everyone younger than `max_age`
    pub async fn employees_set_status_below_age(&self, max_age: i32, status: &str) -> AppResult<u64> {
        let result = sqlx::query("UPDATE employees SET legal_status = $2 WHERE age < $1")
            .bind(max_age)
            .bind(status)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete the first employee called `name`
    pub async fn employees_delete_one_by_name(&self, name: &str) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM employees
            WHERE id = (
                SELECT id FROM employees WHERE name = $1 ORDER BY position LIMIT 1
            )
            "#,
        )
        .bind(name)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete every employee younger than `max_age`
    pub async fn employees_delete_below_age(&self, max_age: i32) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM employees WHERE age < $1")
            .bind(max_age)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Drop the whole employees collection
    pub async fn employees_drop_collection(&self) -> AppResult<()> {
        sqlx::query("DROP TABLE employees").execute(&self.pool).await?;
        Ok(())
    }
}
