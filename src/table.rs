use pad::PadStr;

pub struct Table {
    ncol: usize,
    titles: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(titles: Vec<&'static str>, headless: bool) -> Table {
        let ncol = titles.len();
        let titles = if headless {
            None
        } else {
            Some(titles.into_iter().map(String::from).collect())
        };
        Table {
            ncol,
            titles,
            rows: Vec::new(),
        }
    }

    pub fn add(&mut self, row: Vec<String>) {
        if row.len() != self.ncol {
            panic!("unexpected row len");
        }
        self.rows.push(row);
    }

    pub fn show(&self) {
        println!("{}", self.render());
    }

    fn render(&self) -> String {
        let mut widths = Vec::with_capacity(self.ncol);
        for col in 0..self.ncol {
            let mut width = match &self.titles {
                Some(titles) => console::measure_text_width(&titles[col]),
                None => 0,
            };
            for row in self.rows.iter() {
                let size = console::measure_text_width(&row[col]);
                if size > width {
                    width = size;
                }
            }
            widths.push(width);
        }

        let mut split = String::from("+");
        for width in widths.iter() {
            split.push_str(&"-".repeat(width + 2));
            split.push('+');
        }

        let mut lines = Vec::with_capacity(self.rows.len() + 4);
        lines.push(split.clone());
        if let Some(titles) = &self.titles {
            lines.push(render_row(titles, &widths));
            lines.push(split.clone());
        }
        for row in self.rows.iter() {
            lines.push(render_row(row, &widths));
        }
        lines.push(split);

        lines.join("\n")
    }
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (col, cell) in cells.iter().enumerate() {
        let text = cell.pad_to_width_with_alignment(widths[col], pad::Alignment::Left);
        line.push_str(&format!(" {text} |"));
    }
    line
}
