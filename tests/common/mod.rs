/// Test utilities for composing data-collection log text
///
/// Cooja lines look like `12:00:00.500 ID:5 App: send seqn 7`; testbed
/// lines wrap the same payloads in the harness framing,
/// `[2019-04-02 13:45:12,123] INFO:firefly.5: 5.firefly < b'App: send seqn 7'`.
pub struct LogBuilder {
    lines: Vec<String>,
}

impl LogBuilder {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    fn cooja(mut self, clock: &str, node: u32, payload: &str) -> Self {
        self.lines.push(format!("{} ID:{} {}", clock, node, payload));
        self
    }

    fn testbed(mut self, time: &str, node: u32, payload: &str) -> Self {
        self.lines.push(format!(
            "[{}] INFO:firefly.{}: {}.firefly < b'{}'",
            time, node, node, payload
        ));
        self
    }

    /// Add an arbitrary raw line.
    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    // ------------------------------------------------------------------
    // Cooja lines
    // ------------------------------------------------------------------

    pub fn cooja_boot(self, clock: &str, node: u32) -> Self {
        self.cooja(clock, node, &format!("Rime started with address {}.0", node))
    }

    pub fn cooja_recv(self, clock: &str, dest: u32, src: &str, seqn: u32, hops: u32) -> Self {
        self.cooja(
            clock,
            dest,
            &format!("App: recv from {} seqn {} hops {}", src, seqn, hops),
        )
    }

    pub fn cooja_sent(self, clock: &str, src: u32, seqn: u32) -> Self {
        self.cooja(clock, src, &format!("App: send seqn {}", seqn))
    }

    pub fn cooja_sr_recv(self, clock: &str, dest: u32, seqn: u32, hops: u32, metric: u32) -> Self {
        self.cooja(
            clock,
            dest,
            &format!(
                "App: sr_recv from sink seqn {} hops {} node metric {}",
                seqn, hops, metric
            ),
        )
    }

    pub fn cooja_sr_sent(self, clock: &str, sink: u32, dest: &str, seqn: u32) -> Self {
        self.cooja(
            clock,
            sink,
            &format!("App: sink sending seqn {} to {}", seqn, dest),
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn cooja_energest(
        self,
        clock: &str,
        node: u32,
        count: u32,
        cpu: u64,
        lpm: u64,
        tx: u64,
        rx: u64,
    ) -> Self {
        self.cooja(
            clock,
            node,
            &format!("Energest: {} {} {} {} {}", count, cpu, lpm, tx, rx),
        )
    }

    pub fn cooja_piggyback(self, clock: &str, node: u32) -> Self {
        self.cooja(clock, node, "Protocol: piggyback topology update")
    }

    pub fn cooja_dedicated(self, clock: &str, node: u32) -> Self {
        self.cooja(clock, node, "Protocol: dedicated topology update")
    }

    // ------------------------------------------------------------------
    // Testbed lines
    // ------------------------------------------------------------------

    pub fn testbed_boot(self, time: &str, node: u32) -> Self {
        self.testbed(time, node, &format!("Rime started with address {}.0", node))
    }

    pub fn testbed_recv(self, time: &str, dest: u32, src: &str, seqn: u32, hops: u32) -> Self {
        self.testbed(
            time,
            dest,
            &format!("App: recv from {} seqn {} hops {}", src, seqn, hops),
        )
    }

    pub fn testbed_sent(self, time: &str, src: u32, seqn: u32) -> Self {
        self.testbed(time, src, &format!("App: send seqn {}", seqn))
    }

    pub fn testbed_sr_sent(self, time: &str, sink: u32, dest: &str, seqn: u32) -> Self {
        self.testbed(
            time,
            sink,
            &format!("App: sink sending seqn {} to {}", seqn, dest),
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn testbed_energest(
        self,
        time: &str,
        node: u32,
        count: u32,
        cpu: u64,
        lpm: u64,
        tx: u64,
        rx: u64,
    ) -> Self {
        self.testbed(
            time,
            node,
            &format!("Energest: {} {} {} {} {}", count, cpu, lpm, tx, rx),
        )
    }

    pub fn testbed_piggyback(self, time: &str, node: u32) -> Self {
        self.testbed(time, node, "Protocol: piggyback topology update")
    }

    /// Build the final log text.
    pub fn build(self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

impl Default for LogBuilder {
    fn default() -> Self {
        Self::new()
    }
}
