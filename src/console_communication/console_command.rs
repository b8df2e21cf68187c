use crate::booking::coordinator::BookingEvent;

pub const HELP: &str = "\
commands:
  date YYYY-MM-DD     select the appointment date
  time HH:MM          select an open slot
  type ID             select a consultation type
  doctor ID           switch to another doctor
  slots               show open slots for the selected date
  types               show consultation types
  doctors [specialty] show doctors
  book                submit the booking
  mine                show your appointments
  cancel ID           cancel one of your appointments
  help                show this help
  quit                leave";

#[derive(Debug, PartialEq, Eq)]
pub enum ConsoleCommand {
    Event(BookingEvent),
    Help,
}

/// Parses one console line. `Ok(None)` for blank input, `Err` with a
/// user-facing message for anything unparseable.
pub fn parse(line: &str) -> Result<Option<ConsoleCommand>, String> {
    let mut tokens = line.split_whitespace();
    let Some(command) = tokens.next() else {
        return Ok(None);
    };
    let arg = tokens.next();
    let ev = match (command, arg) {
        ("date", Some(d)) => {
            let date = chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d")
                .map_err(|_| format!("'{d}' is not a date, expected YYYY-MM-DD"))?;
            BookingEvent::SetDate(date)
        }
        ("time", Some(t)) => BookingEvent::SetTime(t.to_string()),
        ("type", Some(id)) => BookingEvent::SetConsultationType(parse_id(id)?),
        ("doctor", Some(id)) => BookingEvent::SetDoctor(parse_id(id)?),
        ("slots", None) => BookingEvent::ShowSlots,
        ("types", None) => BookingEvent::ShowTypes,
        ("doctors", specialty) => BookingEvent::ShowDoctors(specialty.map(str::to_string)),
        ("book", None) => BookingEvent::Submit,
        ("mine", None) => BookingEvent::ListAppointments,
        ("cancel", Some(id)) => BookingEvent::Cancel(u64::from(parse_id(id)?)),
        ("help", None) => return Ok(Some(ConsoleCommand::Help)),
        ("quit" | "exit", None) => BookingEvent::Quit,
        _ => return Err(format!("unknown command '{line}', try 'help'")),
    };
    Ok(Some(ConsoleCommand::Event(ev)))
}

fn parse_id(token: &str) -> Result<u32, String> {
    token.parse().map_err(|_| format!("'{token}' is not a numeric id"))
}
