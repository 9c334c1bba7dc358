/*!

# Quick start

This example shows how to go from a spreadsheet of choir members to a stage
chart, end to end, with the `choirstage` command line tool.

**Preparing the roster** Create a spreadsheet with one row per member and a
header row containing at least the columns `Name`, `Section` and `Height`.
The `Section` values are the usual voice parts (`Soprano`, `Alto`, `Tenor`,
`Bass`); any other label is accepted and displayed as its own category.
Heights can be in any unit as long as they are consistent, only their order
matters. Save the sheet as `roster.xlsx` (the worksheet is expected to be
called `Choir List`, this can be changed with a flag).

**Computing a layout** Run:

```bash
choirstage -i roster.xlsx --rows 3 --chart stage.svg --out layout.csv
```

The tool sorts the members by height, fills the front row with the shortest
members and the back row with the tallest, and writes two files:

- `stage.svg`, a scatter chart of the stage with one dot per member,
  colored by section, labelled with the member's initials, with the front
  row at the bottom;
- `layout.csv`, a table with the columns `Name`, `Section`, `Row`,
  `Column` and `Color`.

**Adjusting by hand** The exported CSV can be edited in any spreadsheet
program, for instance to swap two members. Re-render it without recomputing
anything with:

```bash
choirstage -i layout.csv --input-type fixed_csv --chart stage.svg
```

**Using the library** The same algorithm is available programmatically:

```
use stage_layout::builder::RosterBuilder;
use stage_layout::LayoutConfig;
# use stage_layout::LayoutErrors;

let mut builder = RosterBuilder::new(&LayoutConfig::DEFAULT_CONFIG);
builder.add_member_simple("Ann Smith", "Soprano", 150.0)?;
builder.add_member_simple("Ben Ode", "Alto", 172.0)?;
builder.add_member_simple("Cam Fox", "Tenor", 181.0)?;
for p in builder.assign()?.placements {
    println!("{}: row {}, column {}", p.name, p.row, p.column);
}
# Ok::<(), LayoutErrors>(())
```

For repeated runs, the input files, the palette and the layout rules can be
stored in a JSON configuration file passed with `--config`. See the
`choirstage` command documentation for the accepted fields.

*/
