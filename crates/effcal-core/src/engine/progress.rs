#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    RecordsStart { total: u64 },
    RecordFinished { name: String, zones: usize },
    RecordsFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn silent_reporter_ignores_events() {
        ProgressReporter::new().report(Progress::Message("ignored".to_string()));
    }

    #[test]
    fn callback_receives_events_in_order() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            let label = match event {
                Progress::RecordsStart { total } => format!("start:{total}"),
                Progress::RecordFinished { name, zones } => format!("{name}:{zones}"),
                Progress::RecordsFinish => "finish".to_string(),
                _ => "other".to_string(),
            };
            seen.lock().unwrap().push(label);
        }));
        reporter.report(Progress::RecordsStart { total: 1 });
        reporter.report(Progress::RecordFinished {
            name: "[D;G]".to_string(),
            zones: 2,
        });
        reporter.report(Progress::RecordsFinish);
        drop(reporter);
        assert_eq!(seen.into_inner().unwrap(), vec!["start:1", "[D;G]:2", "finish"]);
    }
}
