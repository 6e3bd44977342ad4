/// Paragraph separator appended after every narrated or written paragraph.
pub const SEPARATOR: &str = "\n\n";

/// The sidebar text containers that narration can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    Narrative,
    ConclusionHeader,
    Conclusion,
}

/// Identifies one narration claim on a panel. A newer claim, a clear or a
/// set invalidates every older ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NarrationTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Typing {
    ticket: NarrationTicket,
    text: String,
}

/// A text container whose content is committed paragraphs plus at most one
/// paragraph still being typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextPanel {
    committed: String,
    typing: Option<Typing>,
    epoch: u64,
}

impl TextPanel {
    pub fn text(&self) -> String {
        match &self.typing {
            Some(typing) => format!("{}{}", self.committed, typing.text),
            None => self.committed.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty() && self.typing.as_ref().is_none_or(|t| t.text.is_empty())
    }

    #[cfg(test)]
    const fn is_typing(&self) -> bool {
        self.typing.is_some()
    }

    /// Claims the panel for a new narration, dropping whatever an earlier,
    /// unfinished narration had typed so far.
    pub fn begin(&mut self) -> NarrationTicket {
        self.epoch += 1;
        let ticket = NarrationTicket(self.epoch);
        self.typing = Some(Typing {
            ticket,
            text: String::new(),
        });
        ticket
    }

    /// Returns false when the ticket has been superseded.
    pub fn type_char(&mut self, ticket: NarrationTicket, ch: char) -> bool {
        match &mut self.typing {
            Some(typing) if typing.ticket == ticket => {
                typing.text.push(ch);
                true
            }
            _ => false,
        }
    }

    pub fn finish(&mut self, ticket: NarrationTicket) -> bool {
        match self.typing.take() {
            Some(typing) if typing.ticket == ticket => {
                self.committed.push_str(&typing.text);
                self.committed.push_str(SEPARATOR);
                true
            }
            other => {
                self.typing = other;
                false
            }
        }
    }

    /// Appends a whole paragraph at once.
    pub fn write(&mut self, paragraph: &str) {
        self.invalidate();
        self.committed.push_str(paragraph);
        self.committed.push_str(SEPARATOR);
    }

    pub fn clear(&mut self) {
        self.invalidate();
        self.committed.clear();
    }

    fn invalidate(&mut self) {
        self.epoch += 1;
        self.typing = None;
    }
}
