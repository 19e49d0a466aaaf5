use chip8::graphics::GraphicsBuffer;

const LIT: char = '#';
const UNLIT: char = '.';

/// Render the screen as text, one line per row.
pub fn render(graphics: &GraphicsBuffer) -> String {
    graphics
        .rows()
        .map(|row| {
            row.iter()
                .map(|lit| if *lit { LIT } else { UNLIT })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
