//! The star-schema projections.
//!
//! Each destination table is filled by one fixed read-only query against
//! the Northwind source. The queries are written for SQLite (the fact
//! table's calendar key uses `strftime`).
//!
//! Nullable source fields are coalesced to sentinels on the way out so the
//! warehouse never sees a missing PostalCode, Fax, HomePage or Photo.

use serde::Serialize;

/// Placeholder for a missing PostalCode, Fax or HomePage.
pub const NA: &str = "NA";

/// Placeholder for a missing employee photo.
pub const NO_PHOTO: &str = "foto no registrada";

/// Source tables the projections read from.
pub const SOURCE_TABLES: &[&str] = &[
    "OrderDetail",
    "Order",
    "Customer",
    "Employee",
    "Shipper",
    "Product",
    "Category",
    "Supplier",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TableKind {
    Dimension,
    Fact,
}

/// One query and the warehouse table it feeds.
#[derive(Debug)]
pub struct Projection {
    pub target: &'static str,
    pub kind: TableKind,
    pub columns: &'static [&'static str],
    pub sql: &'static str,
}

// =============================================================================
// Fact
// =============================================================================

/// One row per order line. Lines whose order, customer, employee, shipper
/// or product is missing are dropped by the inner joins.
///
/// LocationId is the customer's id: locations are customer addresses.
pub static ORDERS_FACT: Projection = Projection {
    target: "orders_fact",
    kind: TableKind::Fact,
    columns: &[
        "FactId",
        "CustomerId",
        "EmployeeId",
        "LocationId",
        "TimeId",
        "ProductId",
        "ShipperId",
        "UnitPrice",
        "Quantity",
        "Discount",
    ],
    sql: r#"
SELECT OrderDetail.Id AS FactId,
       Customer.Id AS CustomerId,
       Employee.Id AS EmployeeId,
       Customer.Id AS LocationId,
       strftime('%Y%m%d', datetime("Order".OrderDate)) AS TimeId,
       Product.Id AS ProductId,
       Shipper.Id AS ShipperId,
       OrderDetail.UnitPrice AS UnitPrice,
       OrderDetail.Quantity AS Quantity,
       OrderDetail.Discount AS Discount
  FROM OrderDetail
 INNER JOIN "Order" ON "Order".Id = OrderDetail.OrderId
 INNER JOIN Customer ON Customer.Id = "Order".CustomerId
 INNER JOIN Employee ON Employee.Id = "Order".EmployeeId
 INNER JOIN Shipper ON Shipper.Id = "Order".ShipVia
 INNER JOIN Product ON Product.Id = OrderDetail.ProductId
"#,
};

// =============================================================================
// Dimensions
// =============================================================================

pub static DIM_CUSTOMER: Projection = Projection {
    target: "dim_customer",
    kind: TableKind::Dimension,
    columns: &[
        "CustomerId",
        "CompanyName",
        "ContactName",
        "ContactTitle",
        "Address",
        "City",
        "Region",
        "PostalCode",
        "Country",
        "Phone",
        "Fax",
    ],
    sql: r#"
SELECT Id AS CustomerId,
       CompanyName,
       ContactName,
       ContactTitle,
       Address,
       City,
       Region,
       COALESCE(PostalCode, 'NA') AS PostalCode,
       Country,
       Phone,
       COALESCE(Fax, 'NA') AS Fax
  FROM Customer
"#,
};

pub static DIM_EMPLOYEE: Projection = Projection {
    target: "dim_employee",
    kind: TableKind::Dimension,
    columns: &[
        "EmployeeId",
        "LastName",
        "FirstName",
        "Title",
        "TitleOfCourtesy",
        "BirthDate",
        "HireDate",
        "Address",
        "City",
        "Region",
        "PostalCode",
        "Country",
        "HomePhone",
        "Extension",
        "Photo",
        "Notes",
        "PhotoPath",
    ],
    sql: r#"
SELECT Id AS EmployeeId,
       LastName,
       FirstName,
       Title,
       TitleOfCourtesy,
       BirthDate,
       HireDate,
       Address,
       City,
       Region,
       PostalCode,
       Country,
       HomePhone,
       Extension,
       COALESCE(Photo, 'foto no registrada') AS Photo,
       Notes,
       PhotoPath
  FROM Employee
"#,
};

/// Customer addresses, keyed by customer id.
pub static DIM_LOCATION: Projection = Projection {
    target: "dim_location",
    kind: TableKind::Dimension,
    columns: &["LocationId", "Address", "City", "Region", "PostalCode", "Country"],
    sql: r#"
SELECT Id AS LocationId,
       Address,
       City,
       Region,
       COALESCE(PostalCode, 'NA') AS PostalCode,
       Country
  FROM Customer
"#,
};

pub static DIM_PRODUCT: Projection = Projection {
    target: "dim_product",
    kind: TableKind::Dimension,
    columns: &[
        "ProductId",
        "ProductName",
        "QuantityPerUnit",
        "UnitPrice",
        "UnitsInStock",
        "UnitsOnOrder",
        "ReorderLevel",
        "Discontinued",
    ],
    sql: r#"
SELECT p.Id AS ProductId,
       p.ProductName AS ProductName,
       p.QuantityPerUnit AS QuantityPerUnit,
       p.UnitPrice AS UnitPrice,
       p.UnitsInStock AS UnitsInStock,
       p.UnitsOnOrder AS UnitsOnOrder,
       p.ReorderLevel AS ReorderLevel,
       p.Discontinued AS Discontinued
  FROM Product p
"#,
};

pub static DIM_CATEGORY: Projection = Projection {
    target: "dim_category",
    kind: TableKind::Dimension,
    columns: &["CategoryId", "CategoryName", "Description"],
    sql: r#"
SELECT Id AS CategoryId,
       CategoryName,
       Description
  FROM Category
"#,
};

pub static DIM_SUPPLIER: Projection = Projection {
    target: "dim_supplier",
    kind: TableKind::Dimension,
    columns: &[
        "SupplierId",
        "CompanyName",
        "ContactName",
        "ContactTitle",
        "Address",
        "City",
        "Region",
        "PostalCode",
        "Country",
        "Phone",
        "Fax",
        "HomePage",
    ],
    sql: r#"
SELECT Id AS SupplierId,
       CompanyName,
       ContactName,
       ContactTitle,
       Address,
       City,
       Region,
       PostalCode,
       Country,
       Phone,
       COALESCE(Fax, 'NA') AS Fax,
       COALESCE(HomePage, 'NA') AS HomePage
  FROM Supplier
"#,
};

pub static DIM_SHIPPER: Projection = Projection {
    target: "dim_shipper",
    kind: TableKind::Dimension,
    columns: &["ShipperId", "CompanyName", "Phone"],
    sql: r#"
SELECT Id AS ShipperId,
       CompanyName,
       Phone
  FROM Shipper
"#,
};

/// Load order: every dimension before the fact table.
pub static LOAD_ORDER: &[&Projection] = &[
    &DIM_CUSTOMER,
    &DIM_EMPLOYEE,
    &DIM_LOCATION,
    &DIM_PRODUCT,
    &DIM_CATEGORY,
    &DIM_SUPPLIER,
    &DIM_SHIPPER,
    // Fact last
    &ORDERS_FACT,
];

/// Get a projection by its destination table name.
pub fn get_projection(target: &str) -> Option<&'static Projection> {
    LOAD_ORDER.iter().find(|p| p.target == target).copied()
}

/// All destination table names, in load order.
pub fn target_names() -> Vec<&'static str> {
    LOAD_ORDER.iter().map(|p| p.target).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_order() {
        assert_eq!(
            target_names(),
            vec![
                "dim_customer",
                "dim_employee",
                "dim_location",
                "dim_product",
                "dim_category",
                "dim_supplier",
                "dim_shipper",
                "orders_fact",
            ]
        );
    }

    #[test]
    fn test_fact_is_last_and_only() {
        let facts: Vec<usize> = LOAD_ORDER
            .iter()
            .enumerate()
            .filter(|(_, p)| p.kind == TableKind::Fact)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(facts, vec![LOAD_ORDER.len() - 1]);
    }

    #[test]
    fn test_fact_keys_have_dimensions() {
        for key in ["CustomerId", "EmployeeId", "LocationId", "ProductId", "ShipperId"] {
            assert!(ORDERS_FACT.columns.contains(&key));
            let owner = LOAD_ORDER
                .iter()
                .filter(|p| p.kind == TableKind::Dimension)
                .find(|p| p.columns[0] == key);
            assert!(owner.is_some(), "no dimension keyed by {}", key);
        }
    }

    #[test]
    fn test_sentinels_in_sql() {
        assert!(DIM_CUSTOMER.sql.contains("COALESCE(PostalCode, 'NA')"));
        assert!(DIM_CUSTOMER.sql.contains("COALESCE(Fax, 'NA')"));
        assert!(DIM_LOCATION.sql.contains("COALESCE(PostalCode, 'NA')"));
        assert!(DIM_SUPPLIER.sql.contains("COALESCE(HomePage, 'NA')"));
        assert!(DIM_EMPLOYEE.sql.contains(NO_PHOTO));
    }

    #[test]
    fn test_get_projection() {
        assert_eq!(get_projection("dim_shipper").unwrap().columns.len(), 3);
        assert!(get_projection("dim_time").is_none());
    }
}
