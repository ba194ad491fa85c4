/*!

This is the long-form manual for `sheet_validator` and `covidsheet`.

## Spreadsheet format

Each state sends one spreadsheet per bulletin date, with one line per city.
Three columns are required. Their names are compared after normalization
(lowercase, no accents, spaces replaced by `_`):

| meaning          | accepted names                                   |
|------------------|--------------------------------------------------|
| confirmed cases  | `confirmados`, `confirmado`, `casos_confirmados` |
| deaths           | `obitos`, `obito`, `morte`, `mortes`             |
| city             | `municipio`, `cidade`                            |

Exactly one column must match each line of the table. Other columns are ignored.

Two lines are special:
* `TOTAL NO ESTADO` holds the state-wide numbers. It is always required.
* `Importados/Indefinidos` holds the cases that are not attributed to any city yet.
  It is required as soon as the spreadsheet has more than the total line.

Both labels are compared exactly, including the case.

## Rules

The numbers must be plain integers: no decimal point, no thousands separator
and no formula. If any line breaks this rule, the validation stops there and
lists all the offending cities.

Then, for each line:
* a line without a city is ignored, unless it carries numbers;
* a city may only appear once;
* cases and deaths go together: both or none;
* deaths may not exceed cases. For `Importados/Indefinidos` this is only a warning;
* negative numbers are rejected;
* the city must belong to the state.

The cities must add up to the total line, both for cases and for deaths. Each of
these checks may be turned off for a given spreadsheet, for example when the
state bulletin itself is known to be inconsistent. A warning is then attached
to the result.

## History

The spreadsheet is finally compared with the last one accepted for the same
state at an earlier date:
* a city that had cases or deaths may not disappear;
* a city that had neither and is missing is added back with zeros;
* lower numbers than before only produce a warning.

`Importados/Indefinidos` follows the same rules as a city.

A spreadsheet with only the total line is accepted: all the cities of the
previous spreadsheet, and its `Importados/Indefinidos` line, are reused as they are.

## Configuration

The command line tool reads the spreadsheet (`csv` or `xlsx`), the registry of
cities and the accepted submissions from files. All the settings may be given
in a JSON file passed with `--config`:

```json
{
    "state": "PR",
    "date": "2020-05-04",
    "filePath": "boletim.xlsx",
    "provider": "xlsx",
    "excelWorksheetName": "Planilha1",
    "citiesFile": "cities.json",
    "historyFile": "history.json",
    "skipSumCases": false,
    "skipSumDeaths": false
}
```

Paths are relative to the configuration file. Command line flags take precedence.

The registry of cities:

```json
{
    "states": [{"state": "PR", "stateIbgeCode": 41}],
    "cities": [{"state": "PR", "city": "Curitiba", "cityIbgeCode": 4106902}]
}
```

The accepted submissions, in the same format as the output records:

```json
[{"state": "PR", "date": "2020-05-03", "records": [
    {"city": null, "city_ibge_code": 41, "confirmed": 12, "deaths": 2,
     "date": "2020-05-03", "state": "PR", "place_type": "state"}
]}]
```

*/
