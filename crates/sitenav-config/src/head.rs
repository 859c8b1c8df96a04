//! Well-formedness check for head markup.
//!
//! The markup is otherwise opaque. HTML void elements (`<link>`, `<meta>`)
//! never get an end tag, so end names are not matched against start names.
//! Only tokenization errors and an end tag with no element open before it
//! are reported: `<link ...></head>` passes, because the end tag closes the
//! unterminated `<link>`.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::ConfigError;

pub(crate) fn check_head_markup(markup: &str) -> Result<(), ConfigError> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().check_end_names = false;

    loop {
        match reader.read_event() {
            Ok(Event::Eof) => return Ok(()),
            Ok(_) => {}
            Err(e) => {
                return Err(ConfigError::MalformedHead(format!(
                    "{e} at byte {}",
                    reader.error_position()
                )));
            }
        }
    }
}
