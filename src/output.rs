use crate::mapping::{Link, Mapping};
use crate::runner::LinkEvent;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

pub struct Output {
    stdout: StandardStream,
}

impl Output {
    pub fn new(color: bool) -> Self {
        let color_choice = if color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            stdout: StandardStream::stdout(color_choice),
        }
    }

    fn set_color(&mut self, color: Color) {
        let _ = self.stdout.set_color(ColorSpec::new().set_fg(Some(color)));
    }

    fn set_bold(&mut self) {
        let _ = self.stdout.set_color(ColorSpec::new().set_bold(true));
    }

    fn set_dim(&mut self) {
        let _ = self.stdout.set_color(ColorSpec::new().set_dimmed(true));
    }

    fn reset(&mut self) {
        let _ = self.stdout.reset();
    }

    pub fn print_event(&mut self, event: LinkEvent<'_>) {
        match event {
            LinkEvent::Planned(link) => {
                self.set_color(Color::Yellow);
                write!(self.stdout, "Would link:").unwrap();
                self.reset();
                self.print_link(link);
            }
            LinkEvent::Created(link) => {
                self.set_color(Color::Green);
                write!(self.stdout, "Created symlink:").unwrap();
                self.reset();
                self.print_link(link);
            }
        }
    }

    fn print_link(&mut self, link: &Link) {
        write!(self.stdout, " {} ", link.source.display()).unwrap();
        self.set_dim();
        write!(self.stdout, "->").unwrap();
        self.reset();
        writeln!(self.stdout, " {}", link.target.display()).unwrap();
    }

    pub fn print_summary(&mut self, mapping: &Mapping, created: bool) {
        let count = mapping.len();
        let noun = if count == 1 { "link" } else { "links" };

        writeln!(self.stdout).unwrap();
        self.set_bold();
        if created {
            write!(self.stdout, "Created {} {}", count, noun).unwrap();
            self.reset();
            writeln!(self.stdout).unwrap();
        } else {
            write!(self.stdout, "Dry run: {} {} planned", count, noun).unwrap();
            self.reset();
            writeln!(self.stdout, " (pass --create to apply)").unwrap();
        }
    }
}
