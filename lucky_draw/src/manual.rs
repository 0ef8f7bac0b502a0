/*!

This is the long-form manual for `lucky_draw` and `luckydraw`.

## Drawing

A draw picks a number of distinct winners among the *available pool*: the
participants, minus the winners of all the previous draws when
`excludePreviousWinners` is on. Every ordered selection of winners is equally
likely. Two participants with the same name are two entries in the pool, so a
name may appear twice among the winners of one draw.

Before each draw, the following checks are run, in this order:
- there is at least one participant (`configuration` error)
- the exclusion of previous winners leaves at least one participant (`exhaustedPool` error)
- the number of winners is between 1 and the size of the pool (`configuration` error)
- if prizes are defined, one of them is selected (`configuration` error)

A failed check leaves the session untouched.

Each successful draw adds a record to the history, with an identifier
(`d1`, `d2`, ...), the winners, a copy of the prize and the time of the draw.
Identifiers are never reused, even after the history is reset. The winners of a
record can be replaced by hand (`editDraw`); the new winners are trimmed and
blank names are dropped, but they are not checked against the list of
participants.

## Input formats

The participants can be typed in the session file or read from files. In all
cases, names are trimmed and blank names are ignored. Imported names are added
to the existing participants, skipping the ones already present. Names typed
with `addParticipants` are always added, even when already present.

### `excel`

The names are in the first column of the first worksheet (or of the worksheet
given with `worksheetName`). Any format read by calamine works (`.xlsx`, `.xls`,
`.ods`). There is no header row: a header would be imported as a participant.
Numbers, booleans and dates are imported as text (a date becomes its serial
number); empty cells and error cells are skipped.

### `csv`

The names are in the first column. There is no header row and the rows may have
different numbers of columns.

```text
Alice,Sales
Bob,IT
Carol
```

### `text`

One name per line.

## Rolling speed

With `--interactive`, the names roll in the terminal until Enter is pressed:

| speed    | interval |
|----------|----------|
| `slow`   | 150 ms   |
| `medium` | 70 ms    |
| `fast`   | 30 ms    |

The rolling names are only a preview. The winners are drawn once the preview is
stopped, with the random generator of the session.

## Session file

```json
{
  "outputSettings": { "title": "Spring party", "outputPath": "summary.json" },
  "participants": ["Alice", "Bob", "Carol", "Dave"],
  "participantSources": [{ "provider": "csv", "filePath": "staff.csv" }],
  "prizes": [{ "id": "gold", "name": "Gold", "imagePath": "gold.png" }],
  "rules": { "winnersPerDraw": 2, "excludePreviousWinners": true, "rollingSpeed": "fast", "randomSeed": 42 },
  "actions": [
    { "action": "draw", "prizeId": "gold" },
    { "action": "editDraw", "drawId": "d1", "winners": ["Erin"] }
  ]
}
```

All the fields are optional. `participants` may also be a single string with one
name per line. Paths are relative to the directory of the session file. Images
(prizes and `backgroundImagePath`) are limited to 5 MB.

The actions are:
- `draw` (`prizeId`, `winners` optional): selects the prize and the number of winners, then draws
- `selectPrize` (`prizeId`, or nothing to clear the selection)
- `addPrize` (`id` optional, `name`, `imagePath` optional)
- `deletePrize` (`prizeId`)
- `editDraw` (`drawId`, `winners`)
- `resetHistory`
- `setWinnerCount` (`winners`): a count of 0 is accepted here and in `rules`, and reported by each draw
- `setExcludePreviousWinners` (`enabled`)
- `addParticipants` (`names`)
- `importParticipants` (`provider`, `filePath`, `worksheetName` optional)

When no action is given, `luckydraw` runs `--draws` draws (1 by default), handing
out the prizes in order.

An action that fails a check of the session is reported and skipped, and the
following actions still run. The summary lists these failures under `errors`.

## Summary

The summary is a JSON document with the settings (`config`), the history in
order of the draws (`results`) and the skipped actions (`errors`). It does not
contain the times of the draws: with a fixed `randomSeed`, running the same
session twice gives the same summary, which can be checked against a reference
with `--reference`.

 */
