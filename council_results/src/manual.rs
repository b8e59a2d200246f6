/*!

This is the long-form manual for `council_results` and `councilreport`.

## Worksheet layout

A single worksheet holds the results of several councils, one block after
the other. Each block looks like this:

| A | B | C |
|---|---|---|
| `1 - MANNAR URBAN COUNCIL` | | |
| `Party` | `Votes` | `Total` |
| `UNP` | `1500` | `2` |
| `SLPP` | `1000` | `1` |
| `TOTAL` | `2500` | `3` |

### Section titles

A block starts at the first row containing a cell whose text begins with a
number, a space and a hyphen (`1 -`, `12 -`) and mentions a council or a sabha
(case does not matter). The title may sit in any column. The block ends
where the next one starts, or at the end of the sheet. `7- X SABHA` or a
note such as `2024-25 council allocations` does not start a block.

The keywords can be changed with `ParseRules::section_keywords`, and the
numbering can be capped with `ParseRules::max_section_number`.

### Header row

The first row of the block after the title that mentions `party`, `votes`
and `total` (anywhere in the row) is the header. The rows between the title
and the header are ignored. A block without header produces no result.

### Party rows

All the rows after the header are read. Empty cells are dropped first, then
the first three remaining values are taken as the party name, the number of
votes and the number of seats. This means that the party name must be the
first filled column: an extra column in front (a serial number, for example)
shifts all the values.

Rows are dropped when:
- fewer than three values remain
- the votes or the seats are not numbers, or are negative
- the party is named `TOTAL`
- the party received no vote (unless `ParseRules::drop_zero_votes` is
  turned off)

Decimal counts are truncated.

```
use council_results::builder::GridBuilder;
use council_results::{parse_council_results, ParseRules, Record};

let grid = GridBuilder::new()
    .text_row(&["1 - MANNAR URBAN COUNCIL", "", ""])
    .text_row(&["Party", "Votes", "Total"])
    .text_row(&["UNP", "1500", "2"])
    .text_row(&["IND 2", "0", "0"])
    .text_row(&["TOTAL", "1500", "2"])
    .build();

let parsed = parse_council_results(&grid, &ParseRules::default())?;
let table = parsed.results.get("1 - MANNAR URBAN COUNCIL").unwrap();
assert_eq!(table.records, vec![Record::new("UNP", 1500, 2)]);

# Ok::<(), council_results::ParseErrors>(())
```

## Diagnostics

`ParsedResults::diagnostics` lists every section found, with what happened to
it: a table, a missing header, no surviving party, or a failure. A failure
(a count too large to be stored, for instance) only affects its own section.
When no section produces any party, `parse_council_results` returns
`ParseErrors::EmptyResultSet`.

*/
