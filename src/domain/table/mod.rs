/// Header cell fragments identifying the wallet column.
const WALLET_HEADERS: [&str; 2] = ["wallet", "address"];
/// Header cell fragments identifying the allocation column.
const ALLOCATION_HEADERS: [&str; 2] = ["allocation", "amount"];

/// A recipient file split into a normalized header and raw data rows.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CsvTable {
    /// Header cells, trimmed and lower-cased.
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Splits `text` on newlines and commas.
    ///
    /// Blank lines are dropped and the first remaining line becomes the
    /// header. Quoted fields are not understood here: a comma always
    /// separates cells. Use [`crate::csv::read_table`] for quoted exports.
    pub fn parse(text: &str) -> Self {
        Self::from_records(
            text.split('\n')
                .filter(|line| !line.trim().is_empty())
                .map(|line| line.split(',').map(str::to_owned).collect()),
        )
    }

    /// Builds a table from already-split records. The first record is the
    /// header.
    pub fn from_records(records: impl IntoIterator<Item = Vec<String>>) -> Self {
        let mut records = records.into_iter();

        let Some(header) = records.next() else {
            return Self::default();
        };

        Self {
            header: header
                .iter()
                .map(|cell| cell.trim().to_lowercase())
                .collect(),
            rows: records.collect(),
        }
    }

    pub fn columns(&self) -> Columns {
        Columns::locate(&self.header)
    }
}

/// Positions of the columns the importer reads.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub wallet: Option<usize>,
    pub allocation: Option<usize>,
}

impl Columns {
    pub fn locate(header: &[String]) -> Self {
        Self {
            wallet: find_column(header, &WALLET_HEADERS),
            allocation: find_column(header, &ALLOCATION_HEADERS),
        }
    }

    pub fn wallet_cell<'a>(&self, row: &'a [String]) -> &'a str {
        cell(row, self.wallet)
    }

    pub fn allocation_cell<'a>(&self, row: &'a [String]) -> &'a str {
        cell(row, self.allocation)
    }
}

fn find_column(header: &[String], fragments: &[&str]) -> Option<usize> {
    header
        .iter()
        .position(|cell| fragments.iter().any(|fragment| cell.contains(fragment)))
}

/// Missing columns and short rows read as empty.
fn cell(row: &[String], index: Option<usize>) -> &str {
    index
        .and_then(|index| row.get(index))
        .map(String::as_str)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_header_and_skips_blank_lines() {
        let table = CsvTable::parse("  Wallet Address , Amount\n\n0xabc,5\n   \n0xdef,6\n");

        assert_eq!(table.header, vec!["wallet address", "amount"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec!["0xdef", "6"]);
    }

    #[test]
    fn locates_first_matching_columns() {
        let table = CsvTable::parse("name,amount,recipient address,allocation,wallet");
        let columns = table.columns();

        assert_eq!(columns.wallet, Some(2));
        assert_eq!(columns.allocation, Some(1));
    }

    #[test]
    fn missing_columns_read_as_empty() {
        let table = CsvTable::parse("name,score\nalice,3");
        let columns = table.columns();

        assert_eq!(columns, Columns::default());
        assert_eq!(columns.wallet_cell(&table.rows[0]), "");
        assert_eq!(columns.allocation_cell(&table.rows[0]), "");
    }

    #[test]
    fn short_rows_read_as_empty() {
        let table = CsvTable::parse("wallet,allocation\n0xabc");
        let columns = table.columns();

        assert_eq!(columns.wallet_cell(&table.rows[0]), "0xabc");
        assert_eq!(columns.allocation_cell(&table.rows[0]), "");
    }

    #[test]
    fn empty_input_has_no_header() {
        assert_eq!(CsvTable::parse(""), CsvTable::default());
        assert_eq!(CsvTable::parse("\n \n"), CsvTable::default());
    }

    #[test]
    fn quotes_are_not_special() {
        let table = CsvTable::parse("wallet,allocation\n\"0xabc,1\",2");

        assert_eq!(table.rows[0], vec!["\"0xabc", "1\"", "2"]);
    }
}
