use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tabula_list::{
    ColumnDescriptor, DynRecord, FilterDescriptor, KeyExtractor, Record, Value,
    field_key,
};

use crate::{DataError, format};

/// A business line of the dashboard, each with its own dataset and schema
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Sector {
    #[default]
    Hr,
    Crm,
    Accounting,
    Ecommerce,
    Hardware,
    Restaurant,
    RealEstate,
    Laundry,
    Law,
    Beauty,
    Gym,
    Logistics,
}

impl Sector {
    pub const ALL: [Self; 12] = [
        Self::Hr,
        Self::Crm,
        Self::Accounting,
        Self::Ecommerce,
        Self::Hardware,
        Self::Restaurant,
        Self::RealEstate,
        Self::Laundry,
        Self::Law,
        Self::Beauty,
        Self::Gym,
        Self::Logistics,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Hr => "Human Resources",
            Self::Crm => "CRM",
            Self::Accounting => "Accounting",
            Self::Ecommerce => "E-commerce",
            Self::Hardware => "Hardware Store",
            Self::Restaurant => "Restaurant",
            Self::RealEstate => "Real Estate",
            Self::Laundry => "Laundry",
            Self::Law => "Law Firm",
            Self::Beauty => "Beauty Salon",
            Self::Gym => "Gym",
            Self::Logistics => "Logistics",
        }
    }

    /// Dataset file stem and serialized name
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Hr => "hr",
            Self::Crm => "crm",
            Self::Accounting => "accounting",
            Self::Ecommerce => "ecommerce",
            Self::Hardware => "hardware",
            Self::Restaurant => "restaurant",
            Self::RealEstate => "real-estate",
            Self::Laundry => "laundry",
            Self::Law => "law",
            Self::Beauty => "beauty",
            Self::Gym => "gym",
            Self::Logistics => "logistics",
        }
    }

    /// What one record of this sector is called
    #[must_use]
    pub const fn entity(self) -> &'static str {
        match self {
            Self::Hr => "Employees",
            Self::Crm => "Leads",
            Self::Accounting => "Invoices",
            Self::Ecommerce | Self::Laundry => "Orders",
            Self::Hardware => "Products",
            Self::Restaurant => "Reservations",
            Self::RealEstate => "Listings",
            Self::Law => "Cases",
            Self::Beauty => "Appointments",
            Self::Gym => "Members",
            Self::Logistics => "Shipments",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    #[must_use]
    pub fn next(self) -> Self {
        let idx = (self.index() + 1) % Self::ALL.len();
        Self::ALL.get(idx).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn previous(self) -> Self {
        let idx = (self.index() + Self::ALL.len() - 1) % Self::ALL.len();
        Self::ALL.get(idx).copied().unwrap_or_default()
    }

    #[must_use]
    pub const fn schema(self) -> SectorSchema {
        match self {
            Self::Hr => SectorSchema {
                columns: HR_COLUMNS,
                search_fields: &["name", "email", "id"],
                filters: HR_FILTERS,
            },
            Self::Crm => SectorSchema {
                columns: CRM_COLUMNS,
                search_fields: &["name", "company", "email", "id"],
                filters: CRM_FILTERS,
            },
            Self::Accounting => SectorSchema {
                columns: ACCOUNTING_COLUMNS,
                search_fields: &["id", "client"],
                filters: ACCOUNTING_FILTERS,
            },
            Self::Ecommerce => SectorSchema {
                columns: ECOMMERCE_COLUMNS,
                search_fields: &["id", "customer", "email"],
                filters: ECOMMERCE_FILTERS,
            },
            Self::Hardware => SectorSchema {
                columns: HARDWARE_COLUMNS,
                search_fields: &["id", "name", "supplier"],
                filters: HARDWARE_FILTERS,
            },
            Self::Restaurant => SectorSchema {
                columns: RESTAURANT_COLUMNS,
                search_fields: &["id", "guest"],
                filters: RESTAURANT_FILTERS,
            },
            Self::RealEstate => SectorSchema {
                columns: REAL_ESTATE_COLUMNS,
                search_fields: &["id", "title", "city"],
                filters: REAL_ESTATE_FILTERS,
            },
            Self::Laundry => SectorSchema {
                columns: LAUNDRY_COLUMNS,
                search_fields: &["id", "customer"],
                filters: LAUNDRY_FILTERS,
            },
            Self::Law => SectorSchema {
                columns: LAW_COLUMNS,
                search_fields: &["id", "title", "client"],
                filters: LAW_FILTERS,
            },
            Self::Beauty => SectorSchema {
                columns: BEAUTY_COLUMNS,
                search_fields: &["id", "client"],
                filters: BEAUTY_FILTERS,
            },
            Self::Gym => SectorSchema {
                columns: GYM_COLUMNS,
                search_fields: &["name", "email", "id"],
                filters: GYM_FILTERS,
            },
            Self::Logistics => SectorSchema {
                columns: LOGISTICS_COLUMNS,
                search_fields: &["id", "origin", "destination"],
                filters: LOGISTICS_FILTERS,
            },
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Sector {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|sector| {
                sector.slug() == wanted
                    || sector.title().to_lowercase() == wanted
            })
            .ok_or_else(|| DataError::UnknownSector(s.to_string()))
    }
}

/// How a cell value is displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellFormat {
    #[default]
    Plain,
    Money,
    Integer,
    Date,
}

impl CellFormat {
    #[must_use]
    pub fn apply(self, value: &Value) -> String {
        match self {
            Self::Plain => value.to_string(),
            Self::Money => value
                .as_number()
                .map_or_else(|| value.to_string(), format::money),
            Self::Integer => value
                .as_number()
                .map_or_else(|| value.to_string(), |n| format::grouped(n, 0)),
            Self::Date => value
                .as_date()
                .map_or_else(|| value.to_string(), format::date),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub key: &'static str,
    pub header: &'static str,
    pub sortable: bool,
    pub format: CellFormat,
}

impl ColumnSpec {
    const fn new(
        key: &'static str,
        header: &'static str,
        sortable: bool,
        format: CellFormat,
    ) -> Self {
        Self {
            key,
            header,
            sortable,
            format,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub name: &'static str,
    pub field: &'static str,
}

impl FilterSpec {
    const fn new(name: &'static str, field: &'static str) -> Self {
        Self { name, field }
    }
}

/// Columns, searchable fields and filters of one sector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorSchema {
    pub columns: &'static [ColumnSpec],
    pub search_fields: &'static [&'static str],
    pub filters: &'static [FilterSpec],
}

/// Every sector's records carry a unique `id`
pub const ID_FIELD: &str = "id";

impl SectorSchema {
    #[must_use]
    pub fn column_descriptors(&self) -> Vec<ColumnDescriptor<DynRecord>> {
        self.columns
            .iter()
            .map(|spec| {
                let key = spec.key;
                let format = spec.format;
                let column = ColumnDescriptor::new(key, spec.header);
                let column = if spec.sortable {
                    column.sortable()
                } else {
                    column
                };
                match format {
                    CellFormat::Plain => column,
                    CellFormat::Money | CellFormat::Integer | CellFormat::Date => {
                        column.with_renderer(move |record: &DynRecord| {
                            format.apply(&record.field(key))
                        })
                    }
                }
            })
            .collect()
    }

    /// Filters with options taken from the values present in `records`
    #[must_use]
    pub fn filter_descriptors(
        &self,
        records: &[DynRecord],
    ) -> Vec<FilterDescriptor> {
        self.filters
            .iter()
            .map(|spec| {
                FilterDescriptor::from_records(spec.name, spec.field, records)
            })
            .collect()
    }

    #[must_use]
    pub fn key_extractor(&self) -> KeyExtractor<DynRecord> {
        field_key(ID_FIELD)
    }
}

use CellFormat::{Date, Integer, Money, Plain};

const HR_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("id", "ID", true, Plain),
    ColumnSpec::new("name", "Name", true, Plain),
    ColumnSpec::new("email", "Email", false, Plain),
    ColumnSpec::new("department", "Department", true, Plain),
    ColumnSpec::new("position", "Position", true, Plain),
    ColumnSpec::new("status", "Status", true, Plain),
    ColumnSpec::new("salary", "Salary", true, Money),
    ColumnSpec::new("hired", "Hired", true, Date),
];

const CRM_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("id", "ID", true, Plain),
    ColumnSpec::new("name", "Contact", true, Plain),
    ColumnSpec::new("company", "Company", true, Plain),
    ColumnSpec::new("email", "Email", false, Plain),
    ColumnSpec::new("stage", "Stage", true, Plain),
    ColumnSpec::new("owner", "Owner", true, Plain),
    ColumnSpec::new("value", "Deal Value", true, Money),
    ColumnSpec::new("last_contact", "Last Contact", true, Date),
];

const ACCOUNTING_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("id", "Invoice", true, Plain),
    ColumnSpec::new("client", "Client", true, Plain),
    ColumnSpec::new("issued", "Issued", true, Date),
    ColumnSpec::new("due", "Due", true, Date),
    ColumnSpec::new("amount", "Amount", true, Money),
    ColumnSpec::new("status", "Status", true, Plain),
    ColumnSpec::new("category", "Category", true, Plain),
];

const ECOMMERCE_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("id", "Order", true, Plain),
    ColumnSpec::new("customer", "Customer", true, Plain),
    ColumnSpec::new("email", "Email", false, Plain),
    ColumnSpec::new("date", "Date", true, Date),
    ColumnSpec::new("items", "Items", true, Integer),
    ColumnSpec::new("total", "Total", true, Money),
    ColumnSpec::new("status", "Status", true, Plain),
    ColumnSpec::new("payment", "Payment", true, Plain),
];

const HARDWARE_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("id", "SKU", true, Plain),
    ColumnSpec::new("name", "Product", true, Plain),
    ColumnSpec::new("category", "Category", true, Plain),
    ColumnSpec::new("supplier", "Supplier", true, Plain),
    ColumnSpec::new("stock", "Stock", true, Integer),
    ColumnSpec::new("price", "Price", true, Money),
    ColumnSpec::new("status", "Availability", true, Plain),
];

const RESTAURANT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("id", "Booking", true, Plain),
    ColumnSpec::new("guest", "Guest", true, Plain),
    ColumnSpec::new("table", "Table", true, Integer),
    ColumnSpec::new("party_size", "Party", true, Integer),
    ColumnSpec::new("time", "Time", true, Date),
    ColumnSpec::new("status", "Status", true, Plain),
    ColumnSpec::new("channel", "Channel", true, Plain),
];

const REAL_ESTATE_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("id", "Listing", true, Plain),
    ColumnSpec::new("title", "Title", true, Plain),
    ColumnSpec::new("city", "City", true, Plain),
    ColumnSpec::new("type", "Type", true, Plain),
    ColumnSpec::new("price", "Price", true, Money),
    ColumnSpec::new("bedrooms", "Beds", true, Integer),
    ColumnSpec::new("status", "Status", true, Plain),
    ColumnSpec::new("listed", "Listed", true, Date),
];

const LAUNDRY_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("id", "Ticket", true, Plain),
    ColumnSpec::new("customer", "Customer", true, Plain),
    ColumnSpec::new("service", "Service", true, Plain),
    ColumnSpec::new("weight", "Weight (kg)", true, Plain),
    ColumnSpec::new("price", "Price", true, Money),
    ColumnSpec::new("status", "Status", true, Plain),
    ColumnSpec::new("pickup", "Pickup", true, Date),
];

const LAW_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("id", "Case", true, Plain),
    ColumnSpec::new("title", "Title", true, Plain),
    ColumnSpec::new("client", "Client", true, Plain),
    ColumnSpec::new("practice_area", "Practice", true, Plain),
    ColumnSpec::new("lawyer", "Lawyer", true, Plain),
    ColumnSpec::new("status", "Status", true, Plain),
    ColumnSpec::new("opened", "Opened", true, Date),
    ColumnSpec::new("billed", "Billed", true, Money),
];

const BEAUTY_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("id", "Appointment", true, Plain),
    ColumnSpec::new("client", "Client", true, Plain),
    ColumnSpec::new("service", "Service", true, Plain),
    ColumnSpec::new("stylist", "Stylist", true, Plain),
    ColumnSpec::new("time", "Time", true, Date),
    ColumnSpec::new("price", "Price", true, Money),
    ColumnSpec::new("status", "Status", true, Plain),
];

const GYM_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("id", "Member", true, Plain),
    ColumnSpec::new("name", "Name", true, Plain),
    ColumnSpec::new("email", "Email", false, Plain),
    ColumnSpec::new("plan", "Plan", true, Plain),
    ColumnSpec::new("trainer", "Trainer", true, Plain),
    ColumnSpec::new("status", "Status", true, Plain),
    ColumnSpec::new("joined", "Joined", true, Date),
    ColumnSpec::new("visits", "Visits", true, Integer),
];

const LOGISTICS_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("id", "Shipment", true, Plain),
    ColumnSpec::new("origin", "Origin", true, Plain),
    ColumnSpec::new("destination", "Destination", true, Plain),
    ColumnSpec::new("carrier", "Carrier", true, Plain),
    ColumnSpec::new("weight", "Weight (kg)", true, Plain),
    ColumnSpec::new("status", "Status", true, Plain),
    ColumnSpec::new("eta", "ETA", true, Date),
];

const HR_FILTERS: &[FilterSpec] = &[
    FilterSpec::new("Department", "department"),
    FilterSpec::new("Status", "status"),
];

const CRM_FILTERS: &[FilterSpec] = &[
    FilterSpec::new("Stage", "stage"),
    FilterSpec::new("Owner", "owner"),
];

const ACCOUNTING_FILTERS: &[FilterSpec] = &[
    FilterSpec::new("Status", "status"),
    FilterSpec::new("Category", "category"),
];

const ECOMMERCE_FILTERS: &[FilterSpec] = &[
    FilterSpec::new("Status", "status"),
    FilterSpec::new("Payment", "payment"),
];

const HARDWARE_FILTERS: &[FilterSpec] = &[
    FilterSpec::new("Category", "category"),
    FilterSpec::new("Stock", "status"),
];

const RESTAURANT_FILTERS: &[FilterSpec] = &[
    FilterSpec::new("Status", "status"),
    FilterSpec::new("Channel", "channel"),
];

const REAL_ESTATE_FILTERS: &[FilterSpec] = &[
    FilterSpec::new("Type", "type"),
    FilterSpec::new("Status", "status"),
    FilterSpec::new("City", "city"),
];

const LAUNDRY_FILTERS: &[FilterSpec] = &[
    FilterSpec::new("Service", "service"),
    FilterSpec::new("Status", "status"),
];

const LAW_FILTERS: &[FilterSpec] = &[
    FilterSpec::new("Practice", "practice_area"),
    FilterSpec::new("Status", "status"),
    FilterSpec::new("Lawyer", "lawyer"),
];

const BEAUTY_FILTERS: &[FilterSpec] = &[
    FilterSpec::new("Service", "service"),
    FilterSpec::new("Stylist", "stylist"),
    FilterSpec::new("Status", "status"),
];

const GYM_FILTERS: &[FilterSpec] = &[
    FilterSpec::new("Plan", "plan"),
    FilterSpec::new("Status", "status"),
];

const LOGISTICS_FILTERS: &[FilterSpec] = &[
    FilterSpec::new("Status", "status"),
    FilterSpec::new("Carrier", "carrier"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_and_previous_wrap() {
        assert_eq!(Sector::Logistics.next(), Sector::Hr);
        assert_eq!(Sector::Hr.previous(), Sector::Logistics);
        assert_eq!(Sector::Hr.next(), Sector::Crm);
    }

    #[test]
    fn test_from_str_accepts_slug_and_title() {
        assert_eq!("real-estate".parse::<Sector>().ok(), Some(Sector::RealEstate));
        assert_eq!("Law Firm".parse::<Sector>().ok(), Some(Sector::Law));
        assert!("bakery".parse::<Sector>().is_err());
    }

    #[test]
    fn test_schemas_are_consistent() {
        for sector in Sector::ALL {
            let schema = sector.schema();
            let keys: Vec<&str> = schema.columns.iter().map(|c| c.key).collect();
            assert!(keys.contains(&ID_FIELD), "{sector} lacks an id column");
            for field in schema.search_fields {
                assert!(keys.contains(field), "{sector}: search on {field}");
            }
            for filter in schema.filters {
                assert!(keys.contains(&filter.field), "{sector}: {}", filter.name);
            }
            let mut unique = keys.clone();
            unique.sort_unstable();
            unique.dedup();
            assert_eq!(unique.len(), keys.len(), "{sector} repeats a column");
        }
    }

    #[test]
    fn test_schema_is_usable_in_const_context() {
        const LAW: SectorSchema = Sector::Law.schema();
        let names: Vec<&str> = LAW.filters.iter().map(|f| f.name).collect();
        assert_eq!(names, ["Practice", "Status", "Lawyer"]);
        for sector in Sector::ALL {
            assert!(!sector.schema().filters.is_empty(), "{sector} has no filters");
        }
    }

    #[test]
    fn test_column_descriptors_apply_formats() {
        let columns = Sector::Hr.schema().column_descriptors();
        let record = DynRecord::new()
            .with("salary", 78_500.0)
            .with("hired", "2021-07-15");
        let salary = columns.iter().find(|c| c.key == "salary");
        let hired = columns.iter().find(|c| c.key == "hired");
        assert_eq!(salary.map(|c| c.render(&record)).as_deref(), Some("$78,500.00"));
        assert_eq!(hired.map(|c| c.render(&record)).as_deref(), Some("15 Jul 2021"));
    }
}
