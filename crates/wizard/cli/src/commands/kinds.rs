//! Supported standards

use crate::error::CliResult;
use crate::output::yes_no;
use tabled::{Table, Tabled};
use wizard_core::{GenericOptions, Kind};
use wizard_generate::option_space_size;

#[derive(Tabled)]
struct KindRow {
    #[tabled(rename = "KIND")]
    kind: String,
    #[tabled(rename = "LIBRARY")]
    library: &'static str,
    #[tabled(rename = "UPGRADEABLE")]
    upgradeable: String,
    #[tabled(rename = "ACCESS BY DEFAULT")]
    access: String,
    #[tabled(rename = "ALTERNATIVES")]
    alternatives: usize,
}

fn row(kind: Kind) -> KindRow {
    KindRow {
        kind: kind.to_string(),
        library: if kind.is_kaia() { "Kaia" } else { "OpenZeppelin" },
        upgradeable: yes_no(!kind.is_kaia()),
        access: yes_no(GenericOptions::defaults(kind).is_access_control_required()),
        alternatives: option_space_size(kind),
    }
}

/// Execute the kinds command
pub fn execute() -> CliResult<()> {
    let rows: Vec<KindRow> = Kind::ALL.into_iter().map(row).collect();
    println!("{}", Table::new(rows));
    Ok(())
}
