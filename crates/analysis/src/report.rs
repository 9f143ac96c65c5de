use std::fmt;
use std::io;

use crate::summary::SummaryResult;

impl SummaryResult {
    pub fn render<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{self}")
    }
}

impl fmt::Display for SummaryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.commit_span {
            Some(span) => writeln!(
                f,
                "Commits: {} ({} to {})",
                self.total_commits,
                span.first.format("%Y-%m-%d"),
                span.last.format("%Y-%m-%d")
            )?,
            None => writeln!(f, "Commits: {}", self.total_commits)?,
        }

        if self.top_committers.is_empty() {
            writeln!(f, "No commits found; top committers unavailable.")?;
        } else {
            writeln!(f, "Top {} committers:", self.top_committers.len())?;
            for (rank, committer) in self.top_committers.iter().enumerate() {
                let noun = if committer.commits == 1 { "commit" } else { "commits" };
                writeln!(
                    f,
                    "  {}. {}: {} {}",
                    rank + 1,
                    committer.author,
                    committer.commits,
                    noun
                )?;
            }
        }

        writeln!(
            f,
            "Issues: {} total, {} closed",
            self.total_issues, self.closed_issues
        )?;
        match self.close_rate {
            Some(rate) => writeln!(f, "Issue close rate: {:.2}%", rate * 100.0)?,
            None => writeln!(f, "No issues found; close rate unavailable.")?,
        }
        match self.avg_open_days {
            Some(days) => writeln!(f, "Average issue open duration: {days:.2} days"),
            None => writeln!(
                f,
                "No closed issues with a known duration; average open duration unavailable."
            ),
        }
    }
}
