use crate::areas::session::EditorSession;
use crate::artifacts::archive::backend::Archive;
use std::io::Write;

impl<A: Archive> EditorSession<A> {
    /// Copies one file of the working checkout to `writer`, as is.
    pub async fn cat(&self, writer: &mut impl Write, file_path: &str) -> anyhow::Result<()> {
        let content = self.working().read_file(file_path).await?;
        writer.write_all(&content)?;

        Ok(())
    }
}
